use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProxyError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    EmptyStagePlan = 3,
    Unauthorized = 4,
    InvalidTarget = 5,
    IncompatibleLayout = 6,
    StageNotTerminal = 7,
    HandOffAlreadyDone = 8,
    ImplementationNotSet = 9,
    RecordNotFound = 10,
    SlotUnset = 11,
}
