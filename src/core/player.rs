//! Seats.
//!
//! A `PlayerId` is all the rules engine knows about a player: the ledger
//! attributes held cards to it, and rosters are ordered lists of them.
//! `PlayerMap` keeps one value per seat of a fixed roster.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Largest roster the engine supports.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// Zero-based seat number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seats `0..player_count` in dealing order, capped at `MAX_PLAYERS`.
    ///
    /// ```
    /// use rust_dealer::core::PlayerId;
    ///
    /// let roster = PlayerId::roster(4);
    /// assert_eq!(roster.first(), Some(&PlayerId::new(0)));
    /// assert_eq!(roster.last(), Some(&PlayerId::new(3)));
    /// ```
    #[must_use]
    pub fn roster(player_count: usize) -> Vec<PlayerId> {
        (0..player_count.min(MAX_PLAYERS))
            .map(|seat| PlayerId(seat as u8))
            .collect()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// One value per seat, indexed by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Seat `i` gets `values[i]`. Anything past `MAX_PLAYERS` is dropped.
    #[must_use]
    pub fn from_vec(mut values: Vec<T>) -> Self {
        values.truncate(MAX_PLAYERS);
        Self { seats: values }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.seats.get_mut(player.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.seats
            .iter()
            .enumerate()
            .map(|(seat, value)| (PlayerId(seat as u8), value))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.seats
            .iter_mut()
            .enumerate()
            .map(|(seat, value)| (PlayerId(seat as u8), value))
    }

    #[must_use]
    pub fn roster(&self) -> Vec<PlayerId> {
        PlayerId::roster(self.seats.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_ordering_and_display() {
        assert!(PlayerId::new(0) < PlayerId::new(1));
        assert_eq!(PlayerId::new(4).index(), 4);
        assert_eq!(PlayerId::new(2).to_string(), "seat 2");
    }

    #[test]
    fn test_roster_caps_at_max() {
        assert_eq!(PlayerId::roster(3), vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
        assert!(PlayerId::roster(0).is_empty());
        assert_eq!(PlayerId::roster(1000).len(), MAX_PLAYERS);
    }

    #[test]
    fn test_player_map_lookup() {
        let mut names = PlayerMap::from_vec(vec!["ann", "bo", "cy"]);

        assert_eq!(names.player_count(), 3);
        assert_eq!(names[PlayerId(2)], "cy");
        assert_eq!(names.get(PlayerId(3)), None);

        names[PlayerId(0)] = "al";
        if let Some(name) = names.get_mut(PlayerId(1)) {
            *name = "bea";
        }
        let all: Vec<_> = names.iter().map(|(_, n)| *n).collect();
        assert_eq!(all, vec!["al", "bea", "cy"]);
        assert_eq!(names.roster(), PlayerId::roster(3));
    }
}
