#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub owner: String,
    pub balance: u64,
    /// Assigned by the ledger, never by callers.
    pub id: u64,
}

include!(concat!(env!("OUT_DIR"), "/bank/account_builder.rs"));
