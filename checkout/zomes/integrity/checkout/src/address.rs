use hdi::prelude::*;

// Equality is structural over every field: two saved copies of the same
// place compare equal even though they live under different action hashes.
#[hdk_entry_helper]
#[derive(Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub unit: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub lat: f64,
    pub lng: f64,
    pub is_default: bool,
    pub label: Option<String>, // "Home", "Work", etc.
}

// What the address picker hands back from its "add address" form.
// `as_new` means the user just typed it in and expects it to become the choice.
#[hdk_entry_helper]
#[derive(Clone, PartialEq)]
pub struct NewAddress {
    pub address: Address,
    #[serde(default)]
    pub as_new: bool,
}
