//! Card identities.
//!
//! A `Card` is an opaque token: the engine only compares and hashes it
//! while moving it between zones. Ranks and suits exist so that games can
//! enumerate a deck and so that error messages read naturally.

use serde::{Deserialize, Serialize};

/// The four suits of a French deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All suits, in enumeration order.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

/// The thirteen ranks of a French deck, low to high.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks, in enumeration order.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }
}

/// Colors cycled through when wild cards are added to a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WildColor {
    Red,
    Black,
    Blue,
}

impl WildColor {
    /// Colors in the order wild cards are minted.
    pub const CYCLE: [WildColor; 3] = [WildColor::Red, WildColor::Black, WildColor::Blue];
}

/// A distinct card identity.
///
/// Wild cards carry a color and a 1-based sequence number so that every
/// wild card in a universe is distinct.
///
/// ```
/// use rust_dealer::cards::{Card, Rank, Suit};
///
/// let ace = Card::standard(Rank::Ace, Suit::Spades);
/// assert_eq!(ace.to_string(), "A♠");
/// assert_eq!(ace.rank(), Some(Rank::Ace));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Card {
    Standard { rank: Rank, suit: Suit },
    Wild { color: WildColor, number: u16 },
}

impl Card {
    /// Create a rank+suit card.
    #[must_use]
    pub const fn standard(rank: Rank, suit: Suit) -> Self {
        Card::Standard { rank, suit }
    }

    /// Create a wild card.
    #[must_use]
    pub const fn wild(color: WildColor, number: u16) -> Self {
        Card::Wild { color, number }
    }

    /// Rank of a standard card; `None` for wild cards.
    #[must_use]
    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Standard { rank, .. } => Some(rank),
            Card::Wild { .. } => None,
        }
    }

    /// Suit of a standard card; `None` for wild cards.
    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Standard { suit, .. } => Some(suit),
            Card::Wild { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_wild(self) -> bool {
        matches!(self, Card::Wild { .. })
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Standard { rank, suit } => write!(f, "{}{}", rank.label(), suit.symbol()),
            Card::Wild { color, number } => write!(f, "Wild({:?} #{})", color, number),
        }
    }
}
