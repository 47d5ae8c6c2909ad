//! # Customization Resolver
//!
//! Decides which option groups an item needs and whether a selection
//! satisfies them.
//!
//! ## Classification (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  category == "O-D WICH"  OR  name contains "OD-Wich"                    │
//! │        └──► Sandwich:  Sandwich (req) + Bread (req) + Add-ons (≤3)      │
//! │                                                                         │
//! │  name (any case) contains "donut" | "cookie" | "brownie"                │
//! │  OR category == "MONDAY OVERDOSE"  OR  name == "Thank You"              │
//! │        └──► Sweet:     Flavor (req) + Add-ons (≤3)                      │
//! │                                                                         │
//! │  anything else                                                          │
//! │        └──► None:      no groups, every selection is valid              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The rule matches on display names, so an item whose name happens to
//! contain "cookie" lands in the Sweet profile whatever it really is.
//! Menu fixtures depend on the literal rule; keep it literal.
//!
//! ## Reactive Validity
//! ```text
//! select / toggle ──► new Selection ──► validate() ──► enable "Add to Cart"
//!        ▲                                                  │
//!        └──────────────────── every change ◄───────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogItem;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Category;

/// Add-on cap per cart entry.
pub const MAX_ADD_ONS: usize = 3;

// =============================================================================
// Option Tables
// =============================================================================

/// One choice inside an option group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionChoice {
    pub label: &'static str,
    pub price: Money,
}

const fn free(label: &'static str) -> OptionChoice {
    OptionChoice {
        label,
        price: Money::zero(),
    }
}

const fn priced(label: &'static str, rupees: i64) -> OptionChoice {
    OptionChoice {
        label,
        price: Money::from_rupees(rupees, 0),
    }
}

const SANDWICH_CHOICES: &[OptionChoice] = &[
    free("Pulled Beef"),
    free("Pesto Chicken"),
    free("Chicken Mortadella"),
    free("Breakfast Croissant"),
    free("Spicy Pakistani"),
    free("Chicken Honey Mustard"),
];

const BREAD_CHOICES: &[OptionChoice] = &[
    free("Ciabatta"),
    free("Croissant"),
    free("Multi grain bread"),
];

const FLAVOR_CHOICES: &[OptionChoice] = &[
    free("Rafaello"),
    free("Cookie-Doh (Filled)"),
    free("Glazed"),
    free("Cinnamon Glazed"),
    free("Plain Chocolate"),
    free("Pink Sprinkle"),
    free("Choco Sprinkle"),
    free("Peanut Butter"),
];

const SANDWICH_ADD_ONS: &[OptionChoice] = &[
    priced("Cheese Slice", 87),
    priced("Double Cheese Slice", 174),
    priced("Pesto Chicken", 217),
    priced("Chicken Mortadella", 217),
    priced("Spicy Pakistani", 217),
    priced("Chicken Honey Mustard", 217),
    priced("Pulled Beef", 217),
];

const SWEET_ADD_ONS: &[OptionChoice] = &[
    priced("Extra Chocolate Drizzle", 50),
    priced("Nutella Filling", 75),
    priced("Cream Cheese", 60),
    priced("Caramel Drizzle", 50),
    priced("Extra Sprinkles", 30),
];

// =============================================================================
// Option Groups
// =============================================================================

/// The five option groups the menu knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OptionGroupKind {
    Sandwich,
    Bread,
    Flavor,
    SandwichAddOns,
    SweetAddOns,
}

impl OptionGroupKind {
    /// Whether the group holds a set (add-ons) rather than one label.
    pub const fn is_add_on(&self) -> bool {
        matches!(
            self,
            OptionGroupKind::SandwichAddOns | OptionGroupKind::SweetAddOns
        )
    }

    pub const fn title(&self) -> &'static str {
        match self {
            OptionGroupKind::Sandwich => "Choose Sandwich",
            OptionGroupKind::Bread => "Choose Bread",
            OptionGroupKind::Flavor => "Choose Flavor",
            OptionGroupKind::SandwichAddOns | OptionGroupKind::SweetAddOns => "Add Ons",
        }
    }

    pub const fn choices(&self) -> &'static [OptionChoice] {
        match self {
            OptionGroupKind::Sandwich => SANDWICH_CHOICES,
            OptionGroupKind::Bread => BREAD_CHOICES,
            OptionGroupKind::Flavor => FLAVOR_CHOICES,
            OptionGroupKind::SandwichAddOns => SANDWICH_ADD_ONS,
            OptionGroupKind::SweetAddOns => SWEET_ADD_ONS,
        }
    }

    pub fn contains(&self, label: &str) -> bool {
        self.choices().iter().any(|c| c.label == label)
    }
}

/// An option group as the customization screen renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionGroup {
    pub kind: OptionGroupKind,
    pub required: bool,
    /// 1 for single-choice groups, [`MAX_ADD_ONS`] for add-on sets.
    pub max_selections: usize,
}

impl OptionGroup {
    const fn single(kind: OptionGroupKind) -> Self {
        OptionGroup {
            kind,
            required: true,
            max_selections: 1,
        }
    }

    const fn add_ons(kind: OptionGroupKind) -> Self {
        OptionGroup {
            kind,
            required: false,
            max_selections: MAX_ADD_ONS,
        }
    }

    pub const fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub const fn choices(&self) -> &'static [OptionChoice] {
        self.kind.choices()
    }

    /// Prompt shown under the group title.
    pub const fn hint(&self) -> &'static str {
        if self.kind.is_add_on() {
            "Select up to 3 options"
        } else {
            "Please select one option"
        }
    }
}

const SANDWICH_GROUPS: &[OptionGroup] = &[
    OptionGroup::single(OptionGroupKind::Sandwich),
    OptionGroup::single(OptionGroupKind::Bread),
    OptionGroup::add_ons(OptionGroupKind::SandwichAddOns),
];

const SWEET_GROUPS: &[OptionGroup] = &[
    OptionGroup::single(OptionGroupKind::Flavor),
    OptionGroup::add_ons(OptionGroupKind::SweetAddOns),
];

// =============================================================================
// Profile
// =============================================================================

/// Which option groups apply to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Profile {
    Sandwich,
    Sweet,
    None,
}

impl Profile {
    pub const fn option_groups(&self) -> &'static [OptionGroup] {
        match self {
            Profile::Sandwich => SANDWICH_GROUPS,
            Profile::Sweet => SWEET_GROUPS,
            Profile::None => &[],
        }
    }

    pub fn applies(&self, kind: OptionGroupKind) -> bool {
        self.option_groups().iter().any(|g| g.kind == kind)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The choices made so far while customizing one item.
///
/// Single-choice groups hold at most one label. Add-ons are a set of up
/// to [`MAX_ADD_ONS`] labels kept in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    sandwich: Option<String>,
    bread: Option<String>,
    flavor: Option<String>,
    #[serde(default)]
    add_ons: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sandwich(&self) -> Option<&str> {
        chosen(&self.sandwich)
    }

    pub fn bread(&self) -> Option<&str> {
        chosen(&self.bread)
    }

    pub fn flavor(&self) -> Option<&str> {
        chosen(&self.flavor)
    }

    pub fn add_ons(&self) -> &[String] {
        &self.add_ons
    }

    /// The label held by a single-choice group, if any.
    pub fn choice(&self, kind: OptionGroupKind) -> Option<&str> {
        match kind {
            OptionGroupKind::Sandwich => self.sandwich(),
            OptionGroupKind::Bread => self.bread(),
            OptionGroupKind::Flavor => self.flavor(),
            OptionGroupKind::SandwichAddOns | OptionGroupKind::SweetAddOns => None,
        }
    }

    pub fn is_selected(&self, kind: OptionGroupKind, label: &str) -> bool {
        if kind.is_add_on() {
            self.add_ons.iter().any(|a| a == label)
        } else {
            self.choice(kind) == Some(label)
        }
    }

    /// Overwrites a single-choice group. Add-on kinds are ignored; use
    /// [`Selection::toggle_add_on`] for those.
    pub fn set_choice(&mut self, kind: OptionGroupKind, label: impl Into<String>) {
        let slot = match kind {
            OptionGroupKind::Sandwich => &mut self.sandwich,
            OptionGroupKind::Bread => &mut self.bread,
            OptionGroupKind::Flavor => &mut self.flavor,
            OptionGroupKind::SandwichAddOns | OptionGroupKind::SweetAddOns => return,
        };
        *slot = Some(label.into());
    }

    /// Builder form of [`Selection::set_choice`].
    pub fn with_choice(mut self, kind: OptionGroupKind, label: impl Into<String>) -> Self {
        self.set_choice(kind, label);
        self
    }

    /// Adds the label if absent (and under the cap), removes it if present.
    ///
    /// Returns whether the selection changed. A fourth distinct label is
    /// silently ignored.
    pub fn toggle_add_on(&mut self, label: &str) -> bool {
        if let Some(pos) = self.add_ons.iter().position(|a| a == label) {
            self.add_ons.remove(pos);
            true
        } else if self.add_ons.len() < MAX_ADD_ONS {
            self.add_ons.push(label.to_string());
            true
        } else {
            false
        }
    }

    /// Builder form of [`Selection::toggle_add_on`].
    pub fn with_add_on(mut self, label: &str) -> Self {
        self.toggle_add_on(label);
        self
    }

    /// One line per chosen group, as the cart screen lists them.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(s) = self.sandwich() {
            lines.push(format!("Sandwich: {}", s));
        }
        if let Some(b) = self.bread() {
            lines.push(format!("Bread: {}", b));
        }
        if let Some(f) = self.flavor() {
            lines.push(format!("Flavor: {}", f));
        }
        if !self.add_ons.is_empty() {
            lines.push(format!("Add-ons: {}", self.add_ons.join(", ")));
        }
        lines
    }
}

/// Empty labels count as "not chosen".
fn chosen(slot: &Option<String>) -> Option<&str> {
    slot.as_deref().filter(|s| !s.trim().is_empty())
}

// =============================================================================
// Resolver
// =============================================================================

/// Stateless classifier and validator for customizations.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver;

impl Resolver {
    /// Classifies an item into a customization profile.
    pub fn classify(item: &CatalogItem) -> Profile {
        if item.category == Category::ODWich || item.name.contains("OD-Wich") {
            return Profile::Sandwich;
        }

        let lower = item.name.to_lowercase();
        let sweet_word = ["donut", "cookie", "brownie"]
            .iter()
            .any(|word| lower.contains(word));
        if sweet_word || item.category == Category::MondayOverdose || item.name == "Thank You" {
            return Profile::Sweet;
        }

        Profile::None
    }

    /// Option groups to render for an item.
    pub fn option_groups(item: &CatalogItem) -> &'static [OptionGroup] {
        Self::classify(item).option_groups()
    }

    /// Checks a selection, naming the first unmet requirement.
    ///
    /// ## Rules
    /// - Sandwich: sandwich and bread chosen
    /// - Sweet: flavor chosen
    /// - Sandwich / Sweet: at most 3 distinct add-ons
    /// - None: always valid
    pub fn check(item: &CatalogItem, selection: &Selection) -> Result<(), ValidationError> {
        let profile = Self::classify(item);
        if profile == Profile::None {
            return Ok(());
        }

        for group in profile.option_groups() {
            if group.required && selection.choice(group.kind).is_none() {
                return Err(ValidationError::MissingChoice {
                    group: group.title().to_string(),
                });
            }
        }

        let add_ons = selection.add_ons();
        if add_ons.len() > MAX_ADD_ONS {
            return Err(ValidationError::TooManyAddOns { max: MAX_ADD_ONS });
        }
        for (i, label) in add_ons.iter().enumerate() {
            if add_ons[..i].contains(label) {
                return Err(ValidationError::DuplicateAddOn(label.clone()));
            }
        }

        Ok(())
    }

    /// Whether the selection may be admitted to the cart.
    pub fn validate(item: &CatalogItem, selection: &Selection) -> bool {
        Self::check(item, selection).is_ok()
    }

    /// Returns a copy of `selection` with `label` toggled in the add-on set.
    pub fn toggle_add_on(selection: &Selection, label: &str) -> Selection {
        let mut next = selection.clone();
        next.toggle_add_on(label);
        next
    }

    /// Returns a copy of `selection` with a single-choice group set.
    ///
    /// The label must belong to the group, and the group must apply to
    /// the item. Nothing else is checked at set time.
    pub fn select(
        item: &CatalogItem,
        selection: &Selection,
        kind: OptionGroupKind,
        label: &str,
    ) -> Result<Selection, ValidationError> {
        Self::ensure_applicable(item, kind)?;
        if kind.is_add_on() {
            return Err(ValidationError::InvalidFormat {
                field: kind.title().to_string(),
                reason: "add-ons are toggled, not selected".to_string(),
            });
        }
        ensure_member(kind, label)?;
        Ok(selection.clone().with_choice(kind, label))
    }

    /// Like [`Resolver::toggle_add_on`], but only for add-ons the item's
    /// add-on group actually lists.
    pub fn toggle_add_on_for(
        item: &CatalogItem,
        selection: &Selection,
        label: &str,
    ) -> Result<Selection, ValidationError> {
        let kind = Self::option_groups(item)
            .iter()
            .map(|g| g.kind)
            .find(OptionGroupKind::is_add_on)
            .ok_or_else(|| ValidationError::GroupNotApplicable {
                group: "Add Ons".to_string(),
                item: item.name.clone(),
            })?;
        ensure_member(kind, label)?;
        Ok(Self::toggle_add_on(selection, label))
    }

    fn ensure_applicable(item: &CatalogItem, kind: OptionGroupKind) -> Result<(), ValidationError> {
        if Self::classify(item).applies(kind) {
            Ok(())
        } else {
            Err(ValidationError::GroupNotApplicable {
                group: kind.title().to_string(),
                item: item.name.clone(),
            })
        }
    }
}

fn ensure_member(kind: OptionGroupKind, label: &str) -> Result<(), ValidationError> {
    if kind.contains(label) {
        Ok(())
    } else {
        Err(ValidationError::NotAllowed {
            field: kind.title().to_string(),
            allowed: kind.choices().iter().map(|c| c.label.to_string()).collect(),
        })
    }
}

// =============================================================================
// Add-on Price Table
// =============================================================================

/// Looks up what an add-on label costs.
pub trait AddOnPricing {
    /// Price of one add-on. Unknown labels cost nothing.
    fn price_of(&self, label: &str) -> Money;
}

/// The fixed price table: every priced add-on on the menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAddOnPrices;

impl AddOnPricing for StaticAddOnPrices {
    fn price_of(&self, label: &str) -> Money {
        SANDWICH_ADD_ONS
            .iter()
            .chain(SWEET_ADD_ONS)
            .find(|c| c.label == label)
            .map(|c| c.price)
            .unwrap_or_default()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: Category) -> CatalogItem {
        CatalogItem::new(1, name, category, Money::from_rupees(100, 0))
    }

    #[test]
    fn test_classify_sandwich_by_category() {
        let wich = item("Chicken", Category::ODWich);
        assert_eq!(Resolver::classify(&wich), Profile::Sandwich);
    }

    #[test]
    fn test_classify_sandwich_by_name() {
        let promo = item("Buy 2 OD-Wich Only !", Category::NewArrival);
        assert_eq!(Resolver::classify(&promo), Profile::Sandwich);

        // Case-sensitive: "od-wich" does not count
        let lower = item("od-wich deal", Category::NewArrival);
        assert_eq!(Resolver::classify(&lower), Profile::None);
    }

    #[test]
    fn test_sandwich_rule_wins_over_sweet_words() {
        let both = item("OD-Wich and donut", Category::NewArrival);
        assert_eq!(Resolver::classify(&both), Profile::Sandwich);
    }

    #[test]
    fn test_classify_sweet() {
        assert_eq!(
            Resolver::classify(&item("Glazed Monday's", Category::MondayOverdose)),
            Profile::Sweet
        );
        assert_eq!(
            Resolver::classify(&item("Brownies And DONUTS", Category::OdOnTheGo)),
            Profile::Sweet
        );
        assert_eq!(
            Resolver::classify(&item("Thank You", Category::NewArrival)),
            Profile::Sweet
        );
        // Exact match only
        assert_eq!(
            Resolver::classify(&item("Thank You!", Category::NewArrival)),
            Profile::None
        );
    }

    /// Known-fragile rule: classification follows the display name, so a
    /// non-sweet item whose name mentions a cookie is treated as sweet.
    #[test]
    fn test_known_fragile_substring_rule() {
        let mug = item("Cookie Monster Mug", Category::OCombos);
        assert_eq!(Resolver::classify(&mug), Profile::Sweet);
    }

    #[test]
    fn test_classify_none() {
        let deal = item("Exclusive Deal 1", Category::ExclusiveDeals);
        assert_eq!(Resolver::classify(&deal), Profile::None);
        assert!(Resolver::validate(&deal, &Selection::new()));
        assert!(Resolver::option_groups(&deal).is_empty());
    }

    #[test]
    fn test_sandwich_requires_sandwich_and_bread() {
        let wich = item("Mortadella", Category::ODWich);

        let mut sel = Selection::new();
        assert!(!Resolver::validate(&wich, &sel));

        sel = sel.with_add_on("Cheese Slice").with_add_on("Pulled Beef");
        assert!(!Resolver::validate(&wich, &sel));

        sel.set_choice(OptionGroupKind::Sandwich, "Pulled Beef");
        assert_eq!(
            Resolver::check(&wich, &sel),
            Err(ValidationError::MissingChoice {
                group: "Choose Bread".to_string()
            })
        );

        sel.set_choice(OptionGroupKind::Bread, "Ciabatta");
        assert!(Resolver::validate(&wich, &sel));
    }

    #[test]
    fn test_sweet_requires_flavor_only() {
        let box6 = item("Thank You", Category::NewArrival);
        let sel = Selection::new().with_add_on("Nutella Filling");
        assert!(!Resolver::validate(&box6, &sel));

        let sel = sel.with_choice(OptionGroupKind::Flavor, "Glazed");
        assert!(Resolver::validate(&box6, &sel));
    }

    #[test]
    fn test_empty_label_is_not_a_choice() {
        let box6 = item("Thank You", Category::NewArrival);
        let sel = Selection::new().with_choice(OptionGroupKind::Flavor, "");
        assert!(!Resolver::validate(&box6, &sel));
    }

    #[test]
    fn test_toggle_add_on_caps_at_three() {
        let mut sel = Selection::new();
        assert!(sel.toggle_add_on("A"));
        assert!(sel.toggle_add_on("B"));
        assert!(sel.toggle_add_on("C"));
        assert!(!sel.toggle_add_on("D"));
        assert_eq!(sel.add_ons(), &["A", "B", "C"]);

        // Removing frees a slot; insertion order is kept
        assert!(sel.toggle_add_on("B"));
        assert!(sel.toggle_add_on("D"));
        assert_eq!(sel.add_ons(), &["A", "C", "D"]);
    }

    #[test]
    fn test_resolver_toggle_returns_new_selection() {
        let before = Selection::new();
        let after = Resolver::toggle_add_on(&before, "Cheese Slice");
        assert!(before.add_ons().is_empty());
        assert_eq!(after.add_ons(), &["Cheese Slice"]);
    }

    #[test]
    fn test_select_checks_group_membership() {
        let wich = item("SandWich", Category::ODWich);
        let sel = Resolver::select(&wich, &Selection::new(), OptionGroupKind::Bread, "Croissant")
            .unwrap();
        assert_eq!(sel.bread(), Some("Croissant"));

        // Overwrites the prior value
        let sel = Resolver::select(&wich, &sel, OptionGroupKind::Bread, "Ciabatta").unwrap();
        assert_eq!(sel.bread(), Some("Ciabatta"));

        assert!(matches!(
            Resolver::select(&wich, &sel, OptionGroupKind::Bread, "Naan"),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            Resolver::select(&wich, &sel, OptionGroupKind::Flavor, "Glazed"),
            Err(ValidationError::GroupNotApplicable { .. })
        ));
    }

    #[test]
    fn test_toggle_add_on_for_uses_item_group() {
        let brownie = item("Brownies", Category::OdOnTheGo);
        let sel = Resolver::toggle_add_on_for(&brownie, &Selection::new(), "Caramel Drizzle")
            .unwrap();
        assert_eq!(sel.add_ons(), &["Caramel Drizzle"]);

        // A sandwich add-on is not on the sweet list
        assert!(Resolver::toggle_add_on_for(&brownie, &sel, "Cheese Slice").is_err());

        let deal = item("Exclusive Deal 1", Category::ExclusiveDeals);
        assert!(Resolver::toggle_add_on_for(&deal, &sel, "Cheese Slice").is_err());
    }

    #[test]
    fn test_deserialized_selection_is_rechecked() {
        let wich = item("Chicken", Category::ODWich);
        let json = r#"{"sandwich":"Pulled Beef","bread":"Ciabatta",
            "addOns":["Cheese Slice","Pulled Beef","Pesto Chicken","Spicy Pakistani"]}"#;
        let sel: Selection = serde_json::from_str(json).unwrap();
        assert_eq!(
            Resolver::check(&wich, &sel),
            Err(ValidationError::TooManyAddOns { max: 3 })
        );

        let json = r#"{"flavor":"Glazed","addOns":["Cream Cheese","Cream Cheese"]}"#;
        let sel: Selection = serde_json::from_str(json).unwrap();
        let donut = item("Box Of 2 donut", Category::ODonut);
        assert!(matches!(
            Resolver::check(&donut, &sel),
            Err(ValidationError::DuplicateAddOn(_))
        ));
    }

    #[test]
    fn test_option_groups_per_profile() {
        let groups = Profile::Sandwich.option_groups();
        assert_eq!(groups.len(), 3);
        assert!(groups[0].required && groups[1].required && !groups[2].required);
        assert_eq!(groups[2].max_selections, MAX_ADD_ONS);
        assert_eq!(groups[2].hint(), "Select up to 3 options");

        let groups = Profile::Sweet.option_groups();
        assert_eq!(groups[0].kind, OptionGroupKind::Flavor);
        assert_eq!(groups[0].choices().len(), 8);
    }

    #[test]
    fn test_static_add_on_prices() {
        let prices = StaticAddOnPrices;
        assert_eq!(prices.price_of("Cheese Slice"), Money::from_rupees(87, 0));
        assert_eq!(prices.price_of("Pulled Beef"), Money::from_rupees(217, 0));
        assert_eq!(prices.price_of("Extra Sprinkles"), Money::from_rupees(30, 0));
        assert_eq!(prices.price_of("Gold Leaf"), Money::zero());
    }

    #[test]
    fn test_summary_lines() {
        let sel = Selection::new()
            .with_choice(OptionGroupKind::Sandwich, "Pesto Chicken")
            .with_choice(OptionGroupKind::Bread, "Croissant")
            .with_add_on("Cheese Slice")
            .with_add_on("Pulled Beef");
        assert_eq!(
            sel.summary_lines(),
            vec![
                "Sandwich: Pesto Chicken",
                "Bread: Croissant",
                "Add-ons: Cheese Slice, Pulled Beef"
            ]
        );
    }
}
