use hdi::prelude::*;

mod address;
pub use address::*;

mod checkout;
pub use checkout::*;

// Which half of the order state the address step is working on
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AddressKind {
    #[default]
    Shipping,
    Billing,
}

impl AddressKind {
    pub fn is_billing(&self) -> bool {
        matches!(self, AddressKind::Billing)
    }
}
