use checkout_integrity::*;
use hdk::prelude::*;

use crate::selector::AddressSelector;

// Props for the address picker component
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddressPickerView {
    pub billing: bool,
    pub addresses: Vec<Address>,
    pub selected: Option<Address>,
    pub errors: Vec<FormError>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
}

// Everything the UI needs to draw the address step
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SelectorView {
    pub picker: AddressPickerView,
    // One line per supplied error, untouched and in order
    pub errors: Vec<String>,
    pub submit: SubmitButton,
}

impl AddressSelector {
    pub fn view(&self) -> SelectorView {
        let flow = self.flow();

        SelectorView {
            picker: AddressPickerView {
                billing: self.kind().is_billing(),
                addresses: self.candidates().as_slice().to_vec(),
                selected: self.selected().cloned(),
                errors: flow.errors.clone(),
            },
            errors: flow.errors.iter().map(|error| error.message.clone()).collect(),
            submit: SubmitButton {
                label: flow.submit_label.clone(),
                disabled: !self.can_submit(),
            },
        }
    }
}
