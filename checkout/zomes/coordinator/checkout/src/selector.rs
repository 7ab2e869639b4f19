use checkout_integrity::*;
use hdk::prelude::*;

use crate::candidates::{build_candidates, CandidateSet};
use crate::error::SelectorError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "type", content = "content")]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(Address),
}

impl Selection {
    pub fn address(&self) -> Option<&Address> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(address) => Some(address),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

impl From<Option<Address>> for Selection {
    fn from(address: Option<Address>) -> Self {
        address.map_or(Selection::NoSelection, Selection::Selected)
    }
}

// Everything the surrounding checkout flow passes down to the address step.
// Partial payloads are accepted; missing fields take their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SelectorProps {
    pub kind: AddressKind,
    pub order: OrderAddresses,
    pub user: UserAddresses,
    pub shipping_as_billing: bool,
    pub errors: Vec<FormError>,
    pub loading: bool,
    pub submit_label: String,
}

// The part of the props the selector keeps watching after mount
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FlowProps {
    pub shipping_as_billing: bool,
    pub loading: bool,
    pub errors: Vec<FormError>,
    pub submit_label: String,
}

impl From<&SelectorProps> for FlowProps {
    fn from(props: &SelectorProps) -> Self {
        FlowProps {
            shipping_as_billing: props.shipping_as_billing,
            loading: props.loading,
            errors: props.errors.clone(),
            submit_label: props.submit_label.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "content")]
pub enum SelectorEvent {
    // The checkout flow re-rendered the step with new props
    PropsChanged(SelectorProps),
    Select(Address),
    AddAddress(NewAddress),
    Submit,
}

// Requests the selector makes of the surrounding checkout flow
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "content")]
pub enum SelectorEffect {
    UpdateFlow(FlowUpdate),
    Submit(Option<Address>),
    // The add-address form can close
    AddressAdded,
}

// State of one mounted address step. Built from props by `mount` and changed
// only through `dispatch`; every dispatch ends with `reconcile`, which drops the
// selection whenever the shipping-as-billing flag is set.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddressSelector {
    kind: AddressKind,
    candidates: CandidateSet,
    selection: Selection,
    flow: FlowProps,
    version: u64,
}

impl AddressSelector {
    pub fn mount(props: &SelectorProps) -> Self {
        let candidates = build_candidates(props.kind, &props.order, &props.user);

        let selection = if props.shipping_as_billing {
            Selection::NoSelection
        } else {
            Selection::from(candidates.first().cloned())
        };

        debug!(
            "[address_selector] Mounted {:?} step with {} candidates, selected: {}",
            props.kind,
            candidates.len(),
            selection.is_selected()
        );

        AddressSelector {
            kind: props.kind,
            candidates,
            selection,
            flow: FlowProps::from(props),
            version: 0,
        }
    }

    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn state(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&Address> {
        self.selection.address()
    }

    pub fn flow(&self) -> &FlowProps {
        &self.flow
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // Either an address is picked or the flag stands in for one, and
    // nothing is already in flight
    pub fn can_submit(&self) -> bool {
        let nothing_chosen = !self.selection.is_selected() && !self.flow.shipping_as_billing;
        !(nothing_chosen || self.flow.loading)
    }

    pub fn dispatch(
        &mut self,
        event: SelectorEvent,
    ) -> Result<Vec<SelectorEffect>, SelectorError> {
        let mut effects = Vec::new();

        match event {
            SelectorEvent::PropsChanged(props) => self.receive_props(props),
            SelectorEvent::Select(address) => self.select(address, &mut effects)?,
            SelectorEvent::AddAddress(new_address) => {
                self.add_address(new_address, &mut effects)
            }
            SelectorEvent::Submit => {
                debug!(
                    "[address_selector] Submitting, selected: {}, shipping_as_billing: {}",
                    self.selection.is_selected(),
                    self.flow.shipping_as_billing
                );
                effects.push(SelectorEffect::Submit(self.selection.address().cloned()));
            }
        }

        self.reconcile();
        Ok(effects)
    }

    // Post-update check: an active shipping-as-billing flag wins over any
    // explicit choice, whoever set it.
    pub fn reconcile(&mut self) {
        if self.flow.shipping_as_billing && self.selection.is_selected() {
            debug!("[address_selector] Shipping-as-billing is set, clearing selection");
            self.set_selection(Selection::NoSelection);
        }
    }

    // The selection must always point into the candidate set. Snapshots come
    // back from the UI, so this is re-checked before they are trusted.
    pub fn verify(&self) -> Result<(), SelectorError> {
        match self.selection.address() {
            Some(address) if !self.candidates.contains(address) => {
                Err(SelectorError::NotACandidate {
                    street: address.street.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    fn receive_props(&mut self, props: SelectorProps) {
        if props.kind != self.kind {
            debug!(
                "[address_selector] Kind changed from {:?} to {:?}, rebuilding",
                self.kind, props.kind
            );
            let version = self.version.saturating_add(1);
            *self = AddressSelector::mount(&props);
            self.version = version;
            return;
        }

        let flow = FlowProps::from(&props);
        if flow != self.flow {
            self.flow = flow;
            self.bump();
        }
    }

    fn select(
        &mut self,
        address: Address,
        effects: &mut Vec<SelectorEffect>,
    ) -> Result<(), SelectorError> {
        if !self.candidates.contains(&address) {
            warn!(
                "[address_selector] Rejected selection of non-candidate address: {}",
                address.street
            );
            return Err(SelectorError::NotACandidate {
                street: address.street,
            });
        }

        self.set_selection(Selection::Selected(address));
        self.uncheck_shipping_as_billing(effects);
        Ok(())
    }

    // Freshly entered addresses are trusted as distinct and are not deduplicated
    fn add_address(&mut self, new_address: NewAddress, effects: &mut Vec<SelectorEffect>) {
        let NewAddress { address, as_new } = new_address;

        if as_new {
            self.uncheck_shipping_as_billing(effects);
        }

        self.candidates.append(address.clone());
        self.bump();

        if as_new {
            self.set_selection(Selection::Selected(address));
        }

        debug!(
            "[address_selector] Added address, {} candidates, as_new: {}",
            self.candidates.len(),
            as_new
        );
        effects.push(SelectorEffect::AddressAdded);
    }

    // The flow owns the flag; we only ask for it to be cleared. The request
    // is applied to our copy too so that this cycle's reconcile keeps the
    // choice that caused it.
    fn uncheck_shipping_as_billing(&mut self, effects: &mut Vec<SelectorEffect>) {
        if self.flow.shipping_as_billing {
            self.flow.shipping_as_billing = false;
            self.bump();
            effects.push(SelectorEffect::UpdateFlow(FlowUpdate {
                shipping_as_billing: false,
            }));
        }
    }

    fn set_selection(&mut self, selection: Selection) {
        if self.selection != selection {
            self.selection = selection;
            self.bump();
        }
    }

    // The counter arrives from the UI inside the snapshot; it never wraps
    #[cfg(test)]
    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    fn bump(&mut self) {
        self.version = self.version.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::address;

    fn props(shipping_as_billing: bool) -> SelectorProps {
        SelectorProps {
            order: OrderAddresses {
                shipping_address: Some(address("A")),
                billing_address: None,
            },
            user: UserAddresses {
                addresses: vec![Some(address("A")), Some(address("B"))],
                ..Default::default()
            },
            shipping_as_billing,
            submit_label: "Continue to Shipping".to_string(),
            ..Default::default()
        }
    }

    fn flag_update() -> SelectorEffect {
        SelectorEffect::UpdateFlow(FlowUpdate {
            shipping_as_billing: false,
        })
    }

    #[test]
    fn mount_selects_first_candidate() {
        let selector = AddressSelector::mount(&props(false));

        assert_eq!(selector.candidates().as_slice(), &[address("A"), address("B")]);
        assert_eq!(selector.selected(), Some(&address("A")));
        assert!(selector.can_submit());
        assert_eq!(selector.version(), 0);
    }

    #[test]
    fn mount_with_flag_starts_empty_but_can_submit() {
        let selector = AddressSelector::mount(&props(true));

        assert_eq!(selector.state(), &Selection::NoSelection);
        assert!(selector.can_submit());
    }

    #[test]
    fn mount_without_candidates_cannot_submit() {
        let selector = AddressSelector::mount(&SelectorProps::default());

        assert!(selector.candidates().is_empty());
        assert_eq!(selector.selected(), None);
        assert!(!selector.can_submit());
    }

    #[test]
    fn flag_turning_on_clears_selection() {
        let mut selector = AddressSelector::mount(&props(false));

        let effects = selector.dispatch(SelectorEvent::PropsChanged(props(true))).unwrap();

        assert!(effects.is_empty());
        assert_eq!(selector.state(), &Selection::NoSelection);
        assert!(selector.can_submit());
    }

    #[test]
    fn select_while_flag_on_requests_flag_cleared() {
        let mut selector = AddressSelector::mount(&props(true));

        let effects = selector.dispatch(SelectorEvent::Select(address("B"))).unwrap();

        assert_eq!(effects, vec![flag_update()]);
        assert_eq!(selector.selected(), Some(&address("B")));
        assert!(!selector.flow().shipping_as_billing);
    }

    #[test]
    fn select_while_flag_off_emits_nothing() {
        let mut selector = AddressSelector::mount(&props(false));

        let effects = selector.dispatch(SelectorEvent::Select(address("B"))).unwrap();

        assert!(effects.is_empty());
        assert_eq!(selector.selected(), Some(&address("B")));
    }

    #[test]
    fn flag_reasserted_after_select_clears_again() {
        let mut selector = AddressSelector::mount(&props(true));
        selector.dispatch(SelectorEvent::Select(address("B"))).unwrap();

        // a sibling toggle sets the flag back on
        selector.dispatch(SelectorEvent::PropsChanged(props(true))).unwrap();

        assert_eq!(selector.selected(), None);
    }

    #[test]
    fn select_outside_candidates_is_rejected() {
        let mut selector = AddressSelector::mount(&props(false));
        let before = selector.clone();

        let result = selector.dispatch(SelectorEvent::Select(address("Z")));

        assert_eq!(
            result,
            Err(SelectorError::NotACandidate {
                street: "Z".to_string()
            })
        );
        assert_eq!(selector, before);
    }

    #[test]
    fn add_new_selects_it_and_clears_flag() {
        let mut selector = AddressSelector::mount(&props(true));

        let effects = selector
            .dispatch(SelectorEvent::AddAddress(NewAddress {
                address: address("C"),
                as_new: true,
            }))
            .unwrap();

        assert_eq!(effects, vec![flag_update(), SelectorEffect::AddressAdded]);
        assert_eq!(
            selector.candidates().as_slice(),
            &[address("A"), address("B"), address("C")]
        );
        assert_eq!(selector.selected(), Some(&address("C")));
    }

    #[test]
    fn add_new_replaces_prior_selection() {
        let mut selector = AddressSelector::mount(&props(false));

        let effects = selector
            .dispatch(SelectorEvent::AddAddress(NewAddress {
                address: address("C"),
                as_new: true,
            }))
            .unwrap();

        assert_eq!(effects, vec![SelectorEffect::AddressAdded]);
        assert_eq!(selector.selected(), Some(&address("C")));
    }

    #[test]
    fn add_existing_keeps_selection_and_does_not_dedup() {
        let mut selector = AddressSelector::mount(&props(false));

        let effects = selector
            .dispatch(SelectorEvent::AddAddress(NewAddress {
                address: address("B"),
                as_new: false,
            }))
            .unwrap();

        assert_eq!(effects, vec![SelectorEffect::AddressAdded]);
        assert_eq!(selector.selected(), Some(&address("A")));
        assert_eq!(
            selector.candidates().as_slice(),
            &[address("A"), address("B"), address("B")]
        );
    }

    #[test]
    fn add_existing_with_flag_leaves_flag_alone() {
        let mut selector = AddressSelector::mount(&props(true));

        let effects = selector
            .dispatch(SelectorEvent::AddAddress(NewAddress {
                address: address("C"),
                as_new: false,
            }))
            .unwrap();

        assert_eq!(effects, vec![SelectorEffect::AddressAdded]);
        assert_eq!(selector.selected(), None);
        assert!(selector.flow().shipping_as_billing);
    }

    #[test]
    fn submit_passes_current_selection() {
        let mut selector = AddressSelector::mount(&props(false));
        let version = selector.version();

        let effects = selector.dispatch(SelectorEvent::Submit).unwrap();

        assert_eq!(effects, vec![SelectorEffect::Submit(Some(address("A")))]);
        assert_eq!(selector.version(), version);
    }

    #[test]
    fn submit_with_flag_passes_nothing() {
        let mut selector = AddressSelector::mount(&props(true));

        let effects = selector.dispatch(SelectorEvent::Submit).unwrap();

        assert_eq!(effects, vec![SelectorEffect::Submit(None)]);
    }

    #[test]
    fn loading_closes_the_gate() {
        let mut selector = AddressSelector::mount(&props(false));
        let mut loading = props(false);
        loading.loading = true;

        selector.dispatch(SelectorEvent::PropsChanged(loading)).unwrap();

        assert!(selector.selected().is_some());
        assert!(!selector.can_submit());
    }

    #[test]
    fn kind_change_rebuilds_from_scratch() {
        let mut selector = AddressSelector::mount(&props(false));
        selector.dispatch(SelectorEvent::Select(address("B"))).unwrap();

        let mut billing = props(false);
        billing.kind = AddressKind::Billing;
        billing.user.default_billing_address = Some(address("Bill"));
        selector.dispatch(SelectorEvent::PropsChanged(billing)).unwrap();

        assert_eq!(selector.kind(), AddressKind::Billing);
        assert_eq!(
            selector.candidates().as_slice(),
            &[address("Bill"), address("A"), address("B")]
        );
        assert_eq!(selector.selected(), Some(&address("Bill")));
        assert!(selector.version() > 0);
    }

    #[test]
    fn unchanged_props_do_not_bump_version() {
        let mut selector = AddressSelector::mount(&props(false));

        selector.dispatch(SelectorEvent::PropsChanged(props(false))).unwrap();
        selector.dispatch(SelectorEvent::Select(address("A"))).unwrap();

        assert_eq!(selector.version(), 0);
    }

    #[test]
    fn verify_catches_tampered_snapshot() {
        let mut selector = AddressSelector::mount(&props(false));
        selector.selection = Selection::Selected(address("Z"));

        assert!(selector.verify().is_err());
        assert!(AddressSelector::mount(&props(false)).verify().is_ok());
    }

    #[test]
    fn version_saturates_instead_of_wrapping() {
        let mut selector = AddressSelector::mount(&props(false)).with_version(u64::MAX);

        selector.dispatch(SelectorEvent::Select(address("B"))).unwrap();
        assert_eq!(selector.version(), u64::MAX);

        let mut billing = props(false);
        billing.kind = AddressKind::Billing;
        selector.dispatch(SelectorEvent::PropsChanged(billing)).unwrap();
        assert_eq!(selector.version(), u64::MAX);
    }
}
