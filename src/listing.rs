//! Restaurant listing
//!
//! The home page's filter chips and sort menu. Filters are combined with AND; a single sort key
//! is applied afterwards with a stable sort, so ties keep their input order.

use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    str::FromStr,
};

use thiserror::Error;

use crate::menu::Restaurant;

/// Restaurants revealed per "load more" step.
pub const PAGE_SIZE: usize = 12;

/// Upper bound, in minutes, for [`ListingFilter::FastDelivery`].
const FAST_DELIVERY_MINUTES: u64 = 30;

/// Errors parsing filter or sort names.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ListingError {
    /// No filter has this label.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// No sort has this label.
    #[error("unknown sort: {0}")]
    UnknownSort(String),
}

/// Filter chips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListingFilter {
    /// Delivers in 30 minutes or less.
    FastDelivery,

    /// Recently onboarded.
    NewOnPlatform,

    /// Rated 4.0 or higher.
    RatingsFourPlus,

    /// Vegetarian only.
    PureVeg,

    /// Has a running offer.
    Offers,

    /// Cost for two between 300 and 600 inclusive.
    MidRange,

    /// Cost for two under 300.
    Budget,
}

impl ListingFilter {
    /// Every filter, in chip order.
    pub const ALL: [ListingFilter; 7] = [
        ListingFilter::FastDelivery,
        ListingFilter::NewOnPlatform,
        ListingFilter::RatingsFourPlus,
        ListingFilter::PureVeg,
        ListingFilter::Offers,
        ListingFilter::MidRange,
        ListingFilter::Budget,
    ];

    /// Chip label.
    pub fn label(self) -> &'static str {
        match self {
            ListingFilter::FastDelivery => "Fast Delivery",
            ListingFilter::NewOnPlatform => "New on FoodWagon",
            ListingFilter::RatingsFourPlus => "Ratings 4.0+",
            ListingFilter::PureVeg => "Pure Veg",
            ListingFilter::Offers => "Offers",
            ListingFilter::MidRange => "Rs. 300-Rs. 600",
            ListingFilter::Budget => "Less than Rs. 300",
        }
    }

    /// Whether `restaurant` passes this filter.
    pub fn matches(self, restaurant: &Restaurant) -> bool {
        match self {
            ListingFilter::FastDelivery => delivery_minutes(&restaurant.delivery_time)
                .is_some_and(|minutes| minutes <= FAST_DELIVERY_MINUTES),
            ListingFilter::NewOnPlatform => restaurant.is_new == Some(true),
            ListingFilter::RatingsFourPlus => restaurant.rating >= 4.0,
            ListingFilter::PureVeg => restaurant.is_pure_veg == Some(true),
            ListingFilter::Offers => restaurant.aggregated_discount_info.is_some(),
            ListingFilter::MidRange => cost_for_two(&restaurant.cost_for_two)
                .is_some_and(|cost| (300..=600).contains(&cost)),
            ListingFilter::Budget => {
                cost_for_two(&restaurant.cost_for_two).is_some_and(|cost| cost < 300)
            }
        }
    }
}

impl fmt::Display for ListingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ListingFilter {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let filter = match s.trim() {
            "Fast Delivery" | "fast-delivery" => ListingFilter::FastDelivery,
            "New on FoodWagon" | "New on platform" | "new" => ListingFilter::NewOnPlatform,
            "Ratings 4.0+" | "rating-4-plus" => ListingFilter::RatingsFourPlus,
            "Pure Veg" | "pure-veg" => ListingFilter::PureVeg,
            "Offers" | "offers" => ListingFilter::Offers,
            "Rs. 300-Rs. 600" | "Rs 300–600" | "Rs 300-600" | "mid-range" => {
                ListingFilter::MidRange
            }
            "Less than Rs. 300" | "Less than Rs 300" | "budget" => ListingFilter::Budget,
            other => return Err(ListingError::UnknownFilter(other.to_string())),
        };

        Ok(filter)
    }
}

/// Sort menu options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Backend order.
    #[default]
    Relevance,

    /// Fastest first.
    DeliveryTime,

    /// Best rated first.
    Rating,

    /// Cheapest first.
    CostLowToHigh,

    /// Most expensive first.
    CostHighToLow,
}

impl SortKey {
    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Relevance => "Relevance",
            SortKey::DeliveryTime => "Delivery Time",
            SortKey::Rating => "Rating",
            SortKey::CostLowToHigh => "Cost: Low to High",
            SortKey::CostHighToLow => "Cost: High to Low",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.trim() {
            "Relevance" | "relevance" => SortKey::Relevance,
            "Delivery Time" | "delivery-time" => SortKey::DeliveryTime,
            "Rating" | "rating" => SortKey::Rating,
            "Cost: Low to High" | "cost-asc" => SortKey::CostLowToHigh,
            "Cost: High to Low" | "cost-desc" => SortKey::CostHighToLow,
            other => return Err(ListingError::UnknownSort(other.to_string())),
        };

        Ok(key)
    }
}

/// Leading whole number of a delivery estimate: `"30-35 mins"` is 30.
pub fn delivery_minutes(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

/// Every digit of a price band read as one number: `"₹500 for two"` is 500.
pub fn cost_for_two(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();

    digits.parse().ok()
}

/// Compare optional keys, keeping `None` after every value whichever way `cmp` orders values.
fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(&T, &T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(&a, &b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn finite_rating(restaurant: &Restaurant) -> Option<f64> {
    Some(restaurant.rating).filter(|rating| !rating.is_nan())
}

/// Filter then sort `restaurants`, returning a new list.
pub fn process(
    restaurants: &[Restaurant],
    filters: &BTreeSet<ListingFilter>,
    sort: SortKey,
) -> Vec<Restaurant> {
    let mut results: Vec<Restaurant> = restaurants
        .iter()
        .filter(|restaurant| filters.iter().all(|filter| filter.matches(restaurant)))
        .cloned()
        .collect();

    match sort {
        SortKey::Relevance => {}
        SortKey::DeliveryTime => results.sort_by(|a, b| {
            missing_last(
                delivery_minutes(&a.delivery_time),
                delivery_minutes(&b.delivery_time),
                Ord::cmp,
            )
        }),
        SortKey::Rating => results.sort_by(|a, b| {
            missing_last(finite_rating(a), finite_rating(b), |a, b| b.total_cmp(a))
        }),
        SortKey::CostLowToHigh => results.sort_by(|a, b| {
            missing_last(
                cost_for_two(&a.cost_for_two),
                cost_for_two(&b.cost_for_two),
                Ord::cmp,
            )
        }),
        SortKey::CostHighToLow => results.sort_by(|a, b| {
            missing_last(
                cost_for_two(&a.cost_for_two),
                cost_for_two(&b.cost_for_two),
                |a, b| b.cmp(a),
            )
        }),
    }

    results
}

/// A window onto processed results.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// Visible restaurants.
    pub restaurants: Vec<Restaurant>,

    /// Whether more results are hidden.
    pub has_more: bool,
}

/// First `visible` restaurants of `results`.
pub fn paginate(results: &[Restaurant], visible: usize) -> ListingPage {
    ListingPage {
        restaurants: results.iter().take(visible).cloned().collect(),
        has_more: results.len() > visible,
    }
}

/// Filter, sort and paging state of the listing view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    filters: BTreeSet<ListingFilter>,
    sort: SortKey,
    visible: usize,
}

impl Default for ListingQuery {
    fn default() -> Self {
        ListingQuery {
            filters: BTreeSet::new(),
            sort: SortKey::default(),
            visible: PAGE_SIZE,
        }
    }
}

impl ListingQuery {
    /// Create a query with no filters, relevance order and one page visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a filter chip. Returns whether it is now active.
    pub fn toggle_filter(&mut self, filter: ListingFilter) -> bool {
        if self.filters.remove(&filter) {
            false
        } else {
            self.filters.insert(filter);
            true
        }
    }

    /// Choose the sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Drop all filters and return to relevance order.
    pub fn clear(&mut self) {
        self.filters.clear();
        self.sort = SortKey::Relevance;
    }

    /// Reveal another page.
    pub fn load_more(&mut self) {
        self.visible = self.visible.saturating_add(PAGE_SIZE);
    }

    /// Active filters.
    pub fn filters(&self) -> &BTreeSet<ListingFilter> {
        &self.filters
    }

    /// Active sort key.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Process `restaurants` and cut the visible page.
    pub fn apply(&self, restaurants: &[Restaurant]) -> ListingPage {
        paginate(&process(restaurants, &self.filters, self.sort), self.visible)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::menu::{DiscountInfo, RestaurantId};

    use super::*;

    fn restaurant(id: u64, rating: f64, delivery_time: &str, cost: &str) -> Restaurant {
        Restaurant {
            id: RestaurantId(id),
            name: format!("R{id}"),
            image_url: String::new(),
            rating,
            delivery_time: delivery_time.to_string(),
            cost_for_two: cost.to_string(),
            cuisines: Vec::new(),
            location: String::new(),
            city: "Bangalore".to_string(),
            is_new: None,
            is_pure_veg: None,
            aggregated_discount_info: None,
        }
    }

    fn ids(restaurants: &[Restaurant]) -> Vec<u64> {
        restaurants.iter().map(|r| r.id.0).collect()
    }

    #[test]
    fn numeric_extraction() {
        assert_eq!(delivery_minutes("30-35 mins"), Some(30));
        assert_eq!(delivery_minutes(" 25 mins"), Some(25));
        assert_eq!(delivery_minutes("soon"), None);

        assert_eq!(cost_for_two("₹500 for two"), Some(500));
        assert_eq!(cost_for_two("Rs. 1,200"), Some(1200));
        assert_eq!(cost_for_two("free"), None);
    }

    #[test]
    fn filters_combine_with_and() {
        let mut veg_fast = restaurant(1, 4.5, "20-25 mins", "₹250 for two");
        veg_fast.is_pure_veg = Some(true);

        let mut veg_slow = restaurant(2, 4.5, "45-50 mins", "₹250 for two");
        veg_slow.is_pure_veg = Some(true);

        let fast = restaurant(3, 4.5, "20 mins", "₹250 for two");

        let filters = BTreeSet::from([ListingFilter::PureVeg, ListingFilter::FastDelivery]);

        let results = process(&[veg_fast, veg_slow, fast], &filters, SortKey::Relevance);

        assert_eq!(ids(&results), vec![1]);
    }

    #[test]
    fn unparseable_values_never_match_numeric_filters() {
        let unknown = restaurant(1, 4.0, "soon", "ask us");

        for filter in [
            ListingFilter::FastDelivery,
            ListingFilter::MidRange,
            ListingFilter::Budget,
        ] {
            assert!(!filter.matches(&unknown), "{filter} matched");
        }
    }

    #[test]
    fn price_band_bounds() {
        let low = restaurant(1, 4.0, "30 mins", "₹300 for two");
        let high = restaurant(2, 4.0, "30 mins", "₹600 for two");
        let budget = restaurant(3, 4.0, "30 mins", "₹299 for two");

        assert!(ListingFilter::MidRange.matches(&low));
        assert!(ListingFilter::MidRange.matches(&high));
        assert!(!ListingFilter::MidRange.matches(&budget));
        assert!(ListingFilter::Budget.matches(&budget));
        assert!(!ListingFilter::Budget.matches(&low));
    }

    #[test]
    fn disjoint_price_bands_match_nothing_together() {
        let cheap = restaurant(1, 4.0, "30 mins", "₹250");
        let pricier = restaurant(2, 4.0, "30 mins", "₹550");
        let all = [cheap, pricier];

        let budget = BTreeSet::from([ListingFilter::Budget]);
        let both = BTreeSet::from([ListingFilter::Budget, ListingFilter::MidRange]);

        assert_eq!(ids(&process(&all, &budget, SortKey::Relevance)), vec![1]);
        assert!(process(&all, &both, SortKey::Relevance).is_empty());
    }

    #[test]
    fn offers_and_new_flags() {
        let mut offer = restaurant(1, 3.0, "30 mins", "₹300");
        offer.aggregated_discount_info = Some(DiscountInfo {
            header: "50% OFF".to_string(),
            sub_header: "UPTO ₹100".to_string(),
        });
        offer.is_new = Some(true);

        let plain = restaurant(2, 3.0, "30 mins", "₹300");

        assert!(ListingFilter::Offers.matches(&offer));
        assert!(ListingFilter::NewOnPlatform.matches(&offer));
        assert!(!ListingFilter::Offers.matches(&plain));
        assert!(!ListingFilter::NewOnPlatform.matches(&plain));
    }

    #[test]
    fn sorts_are_stable_with_missing_keys_last() {
        let restaurants = [
            restaurant(1, 4.0, "soon", "₹400"),
            restaurant(2, 4.5, "40 mins", "₹200"),
            restaurant(3, 4.0, "20 mins", "ask"),
            restaurant(4, f64::NAN, "20 mins", "₹400"),
        ];
        let none = BTreeSet::new();

        assert_eq!(
            ids(&process(&restaurants, &none, SortKey::DeliveryTime)),
            vec![3, 4, 2, 1]
        );
        assert_eq!(
            ids(&process(&restaurants, &none, SortKey::Rating)),
            vec![2, 1, 3, 4]
        );
        assert_eq!(
            ids(&process(&restaurants, &none, SortKey::CostLowToHigh)),
            vec![2, 1, 4, 3]
        );
        assert_eq!(
            ids(&process(&restaurants, &none, SortKey::CostHighToLow)),
            vec![1, 4, 2, 3]
        );
        assert_eq!(
            ids(&process(&restaurants, &none, SortKey::Relevance)),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn process_does_not_touch_input() {
        let restaurants = vec![
            restaurant(1, 3.0, "30 mins", "₹300"),
            restaurant(2, 5.0, "30 mins", "₹300"),
        ];
        let before = ids(&restaurants);

        let _sorted = process(&restaurants, &BTreeSet::new(), SortKey::Rating);

        assert_eq!(ids(&restaurants), before);
    }

    #[test]
    fn labels_parse_both_forms() -> TestResult {
        assert_eq!(
            "New on platform".parse::<ListingFilter>()?,
            ListingFilter::NewOnPlatform
        );
        assert_eq!(
            "Rs 300–600".parse::<ListingFilter>()?,
            ListingFilter::MidRange
        );
        assert_eq!(
            "Less than Rs 300".parse::<ListingFilter>()?,
            ListingFilter::Budget
        );
        assert_eq!("cost-desc".parse::<SortKey>()?, SortKey::CostHighToLow);
        assert_eq!(
            "Spicy".parse::<ListingFilter>(),
            Err(ListingError::UnknownFilter("Spicy".to_string()))
        );

        for filter in ListingFilter::ALL {
            assert_eq!(filter.label().parse::<ListingFilter>()?, filter);
        }

        Ok(())
    }

    #[test]
    fn query_pages_and_clears() {
        let restaurants: Vec<Restaurant> = (1..=30)
            .map(|id| restaurant(id, 4.0, "30 mins", "₹300"))
            .collect();

        let mut query = ListingQuery::new();

        let page = query.apply(&restaurants);
        assert_eq!(page.restaurants.len(), PAGE_SIZE);
        assert!(page.has_more);

        query.load_more();
        query.load_more();

        let page = query.apply(&restaurants);
        assert_eq!(page.restaurants.len(), 30);
        assert!(!page.has_more);

        assert!(query.toggle_filter(ListingFilter::Offers));
        query.set_sort(SortKey::Rating);
        assert!(query.apply(&restaurants).restaurants.is_empty());

        query.clear();
        assert!(query.filters().is_empty());
        assert_eq!(query.sort(), SortKey::Relevance);
        assert!(query.toggle_filter(ListingFilter::Offers));
        assert!(!query.toggle_filter(ListingFilter::Offers));
    }
}
