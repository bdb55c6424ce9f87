//! Supplier and product records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
}

/// Everything `/fetch-data` returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub suppliers: Vec<Supplier>,
    pub products: Vec<Product>,
}

impl Dataset {
    /// The fixed data set served until a real store is wired in.
    pub fn fixed() -> Self {
        Self {
            suppliers: vec![
                Supplier {
                    name: "AB Vasilopoulos".to_string(),
                    email: "orders@ab.gr".to_string(),
                },
                Supplier {
                    name: "Sklavenitis".to_string(),
                    email: "sales@sklavenitis.gr".to_string(),
                },
            ],
            products: vec![
                Product {
                    name: "Milk 1L".to_string(),
                    price: 1.29,
                },
                Product {
                    name: "Bread".to_string(),
                    price: 0.99,
                },
            ],
        }
    }
}
