// Adapters layer: concrete implementations of the domain ports.

pub mod router;

pub use router::MemoryRouter;
