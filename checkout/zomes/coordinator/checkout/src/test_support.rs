use checkout_integrity::*;

pub(crate) fn address(street: &str) -> Address {
    Address {
        street: street.to_string(),
        unit: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        lat: 39.7817,
        lng: -89.6501,
        is_default: false,
        label: None,
    }
}
