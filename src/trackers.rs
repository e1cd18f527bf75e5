/// Offline GOG tracker: greedy extraction of globally cheapest tracks by dynamic programming
///
pub mod gog;
