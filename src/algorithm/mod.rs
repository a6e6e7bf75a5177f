/// Greedy acceptance state machine
pub mod climber;
/// Squared-error objective
pub mod energy;
/// Neighbor canvas generation
pub mod neighbor;
/// Search loop and frame sinks
pub mod search;
