// Draft core: snake turn order, pick records, rosters, and the engine.

pub mod engine;
pub mod pick;
pub mod roster;
pub mod turn;
