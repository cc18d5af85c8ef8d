pub mod slots;

pub use slots::SlotRepository;
