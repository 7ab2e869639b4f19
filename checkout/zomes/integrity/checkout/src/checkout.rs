use hdi::prelude::*;

use crate::{Address, AddressKind};

// Addresses already attached to the in-progress order
#[hdk_entry_helper]
#[derive(Clone, Default, PartialEq)]
pub struct OrderAddresses {
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub billing_address: Option<Address>,
}

impl OrderAddresses {
    pub fn address_for(&self, kind: AddressKind) -> Option<&Address> {
        match kind {
            AddressKind::Shipping => self.shipping_address.as_ref(),
            AddressKind::Billing => self.billing_address.as_ref(),
        }
    }
}

// The signed-in user's address book. Saved entries can arrive as null from
// the UI and are skipped when candidates are assembled.
#[hdk_entry_helper]
#[derive(Clone, Default, PartialEq)]
pub struct UserAddresses {
    #[serde(default)]
    pub addresses: Vec<Option<Address>>,
    #[serde(default)]
    pub default_shipping_address: Option<Address>,
    #[serde(default)]
    pub default_billing_address: Option<Address>,
}

impl UserAddresses {
    pub fn default_for(&self, kind: AddressKind) -> Option<&Address> {
        match kind {
            AddressKind::Shipping => self.default_shipping_address.as_ref(),
            AddressKind::Billing => self.default_billing_address.as_ref(),
        }
    }
}

// Validation message supplied by the surrounding checkout flow
#[hdk_entry_helper]
#[derive(Clone, PartialEq)]
pub struct FormError {
    pub message: String,
}

// Payload of the request sent back to the checkout flow when the
// shipping-as-billing flag has to change
#[hdk_entry_helper]
#[derive(Clone, Copy, PartialEq)]
pub struct FlowUpdate {
    pub shipping_as_billing: bool,
}
