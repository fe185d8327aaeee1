use serde::{Deserialize, Serialize};

use super::Timestamped;
use crate::clients::yelp::YelpBusiness;
use crate::domain::LocationId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Yelp {
    pub name: String,
    pub image_url: String,
    pub price: Option<String>,
    pub rating: f64,
    pub url: String,
    pub created_at: i64,
    pub location_id: LocationId,
}

impl Yelp {
    #[must_use]
    pub fn from_business(business: YelpBusiness, location_id: LocationId, created_at: i64) -> Self {
        Self {
            name: business.name,
            image_url: business.image_url,
            price: business.price,
            rating: business.rating,
            url: business.url,
            created_at,
            location_id,
        }
    }
}

impl Timestamped for Yelp {
    fn created_at(&self) -> i64 {
        self.created_at
    }
}
