use checkout_integrity::*;
use hdk::prelude::*;

// Ordered list of addresses the user can pick from. Deduplicated when built;
// addresses added later through the picker are appended as-is.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct CandidateSet(Vec<Address>);

impl CandidateSet {
    // Keeps the first occurrence of every structurally equal address
    pub fn from_addresses<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let mut unique: Vec<Address> = Vec::new();
        for address in addresses {
            if !unique.contains(&address) {
                unique.push(address);
            }
        }
        CandidateSet(unique)
    }

    pub(crate) fn append(&mut self, address: Address) {
        self.0.push(address);
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.0.contains(address)
    }

    pub fn first(&self) -> Option<&Address> {
        self.0.first()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Address> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Address> {
        self.0
    }
}

// Candidates for one checkout step: the order's own address for `kind`
// (falling back to the user's default for `kind`), then every saved address.
pub fn build_candidates(
    kind: AddressKind,
    order: &OrderAddresses,
    user: &UserAddresses,
) -> CandidateSet {
    let preferred = order
        .address_for(kind)
        .or_else(|| user.default_for(kind))
        .cloned();

    let saved = user.addresses.iter().flatten().cloned();

    CandidateSet::from_addresses(preferred.into_iter().chain(saved))
}
