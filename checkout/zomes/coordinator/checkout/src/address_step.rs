use checkout_integrity::*;
use hdk::prelude::*;

use crate::candidates::build_candidates;
use crate::selector::{AddressSelector, SelectorProps};
use crate::{BuildCandidatesInput, DispatchInput, SelectorOutput};

pub(crate) fn build_address_candidates_impl(
    input: BuildCandidatesInput,
) -> ExternResult<Vec<Address>> {
    let candidates = build_candidates(input.kind, &input.order, &input.user);
    warn!(
        "[build_address_candidates] {} candidates for {:?}",
        candidates.len(),
        input.kind
    );
    Ok(candidates.into_vec())
}

pub(crate) fn mount_address_selector_impl(props: SelectorProps) -> ExternResult<SelectorOutput> {
    let selector = AddressSelector::mount(&props);
    warn!(
        "[mount_address_selector] Mounted {:?} step, {} candidates",
        selector.kind(),
        selector.candidates().len()
    );

    Ok(SelectorOutput {
        view: selector.view(),
        selector,
        effects: Vec::new(),
    })
}

pub(crate) fn dispatch_address_event_impl(input: DispatchInput) -> ExternResult<SelectorOutput> {
    let DispatchInput { mut selector, event } = input;

    if let Err(e) = selector.verify() {
        warn!("[dispatch_address_event] Rejecting snapshot: {}", e);
        return Err(e.into());
    }

    let effects = match selector.dispatch(event) {
        Ok(effects) => effects,
        Err(e) => {
            warn!("[dispatch_address_event] Event rejected: {}", e);
            return Err(e.into());
        }
    };
    warn!(
        "[dispatch_address_event] Version {}, {} effects",
        selector.version(),
        effects.len()
    );

    Ok(SelectorOutput {
        view: selector.view(),
        selector,
        effects,
    })
}
