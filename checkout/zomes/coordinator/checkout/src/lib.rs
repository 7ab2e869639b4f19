use checkout_integrity::*;
use hdk::prelude::*;

mod address_step;
mod candidates;
mod error;
mod selector;
mod view;

#[cfg(test)]
mod test_support;

pub use candidates::{build_candidates, CandidateSet};
pub use error::SelectorError;
pub use selector::{
    AddressSelector, FlowProps, Selection, SelectorEffect, SelectorEvent, SelectorProps,
};
pub use view::{AddressPickerView, SelectorView, SubmitButton};

#[derive(Serialize, Deserialize, Debug)]
pub struct BuildCandidatesInput {
    #[serde(default)]
    pub kind: AddressKind,
    #[serde(default)]
    pub order: OrderAddresses,
    #[serde(default)]
    pub user: UserAddresses,
}

// The UI holds the selector between calls and hands it back with each event
#[derive(Serialize, Deserialize, Debug)]
pub struct DispatchInput {
    pub selector: AddressSelector,
    pub event: SelectorEvent,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SelectorOutput {
    pub selector: AddressSelector,
    pub effects: Vec<SelectorEffect>,
    pub view: SelectorView,
}

// Deduplicated addresses offered for the given step
#[hdk_extern]
pub fn build_address_candidates(input: BuildCandidatesInput) -> ExternResult<Vec<Address>> {
    address_step::build_address_candidates_impl(input)
}

// Start the address step for a freshly mounted checkout page
#[hdk_extern]
pub fn mount_address_selector(props: SelectorProps) -> ExternResult<SelectorOutput> {
    address_step::mount_address_selector_impl(props)
}

// Apply one UI event (select, add, submit or new props) to a mounted step
#[hdk_extern]
pub fn dispatch_address_event(input: DispatchInput) -> ExternResult<SelectorOutput> {
    address_step::dispatch_address_event_impl(input)
}
