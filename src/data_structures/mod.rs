/// Legal actions of one agent. Inline for the usual branching factor.
pub type ActionList<T> = smallvec::SmallVec<[T; 8]>;

/// Short per-maze lists: agent positions, capsules.
pub type SmallList<T> = smallvec::SmallVec<[T; 4]>;
