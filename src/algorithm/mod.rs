/// Socket compatibility checks against chosen neighbours
pub mod adjacency;
/// Efficient bitset implementation for candidate tracking
pub mod bitset;
/// Collapse engine and orchestration
pub mod executor;
/// Candidate propagation bursts after a collapse
pub mod propagation;
/// Seeded uniform choice of tiles and wave orders
pub mod selection;
