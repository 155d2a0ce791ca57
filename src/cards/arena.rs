//! Arena-allocated card stacks.
//!
//! Cards live in a single `CardArena` and are addressed by stable `CardId`s;
//! a stack is an intrusive doubly-linked list threaded through the arena via
//! explicit `prev`/`next` indices. Splicing a run from one stack to another
//! rewrites links only, so a sub-sequence transfers wholesale and detached
//! runs always have nulled external links.
//!
//! All cards of a deal share one arena; the whole arena is dropped when the
//! session deals again. Broken links are programmer errors and panic.

use serde::{Deserialize, Serialize};

use crate::cards::card::{Card, MarkerKind, Rank, Suit};
use crate::core::rng::DealRng;

/// Stable handle to a card in a [`CardArena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Node {
    card: Card,
    prev: Option<CardId>,
    next: Option<CardId>,
}

/// Arena owning every card of one deal.
#[derive(Clone, Debug, Default)]
pub struct CardArena {
    nodes: Vec<Node>,
}

impl CardArena {
    /// Create an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an unlinked card.
    pub fn alloc(&mut self, card: Card) -> CardId {
        let id = CardId(self.nodes.len() as u32);
        self.nodes.push(Node {
            card,
            prev: None,
            next: None,
        });
        id
    }

    /// Number of cards allocated (markers included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the arena empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, id: CardId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: CardId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    /// Read a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.node(id).card
    }

    /// Mutate a card (face state).
    pub fn card_mut(&mut self, id: CardId) -> &mut Card {
        &mut self.node_mut(id).card
    }

    /// The card below `id`, if any.
    #[must_use]
    pub fn prev(&self, id: CardId) -> Option<CardId> {
        self.node(id).prev
    }

    /// The card above `id`, if any.
    #[must_use]
    pub fn next(&self, id: CardId) -> Option<CardId> {
        self.node(id).next
    }

    /// Build a fresh deck: one bottom marker followed by
    /// `decks * suits.len() * 13` cards in canonical suit/rank order.
    /// Returns the marker, which heads the deck stack.
    pub fn new_deck(&mut self, decks: u8, suits: &[Suit]) -> CardId {
        let bottom = self.alloc(Card::bottom(MarkerKind::Foundation, None));
        let mut tail = bottom;
        for _ in 0..decks {
            for &suit in suits {
                for rank in Rank::all() {
                    let card = self.alloc(Card::standard(suit, rank));
                    self.link(tail, card);
                    tail = card;
                }
            }
        }
        bottom
    }

    fn link(&mut self, below: CardId, above: CardId) {
        self.node_mut(below).next = Some(above);
        self.node_mut(above).prev = Some(below);
    }

    /// Detach a single card, leaving its neighbors linked to each other. O(1).
    pub fn take_card(&mut self, id: CardId) -> CardId {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        if let Some(p) = prev {
            self.node_mut(p).next = next;
        }
        if let Some(n) = next {
            self.node_mut(n).prev = prev;
        }
        let node = self.node_mut(id);
        node.prev = None;
        node.next = None;
        id
    }

    /// Detach the suffix run starting at `id` (the card and everything above
    /// it), leaving it self-contained.
    pub fn take_stack(&mut self, id: CardId) -> CardId {
        if let Some(p) = self.node(id).prev {
            self.node_mut(p).next = None;
        }
        self.node_mut(id).prev = None;
        id
    }

    /// Append the run starting at `src` to the end of `dest`'s stack,
    /// detaching it from its current stack first. `dest` may be any card in
    /// the destination stack; the true tail is found by walking up.
    pub fn splice(&mut self, dest: CardId, src: CardId) {
        let tail = self.top_of(dest);
        assert_ne!(tail, src, "cannot splice a stack onto itself");
        if let Some(p) = self.node(src).prev {
            self.node_mut(p).next = None;
        }
        self.link(tail, src);
    }

    /// Walk down to the bottom marker of the stack containing `id`.
    #[must_use]
    pub fn bottom_of(&self, id: CardId) -> CardId {
        let mut cur = id;
        while let Some(p) = self.node(cur).prev {
            cur = p;
        }
        cur
    }

    /// Walk up to the topmost card of the stack containing `id`.
    #[must_use]
    pub fn top_of(&self, id: CardId) -> CardId {
        let mut cur = id;
        while let Some(n) = self.node(cur).next {
            cur = n;
        }
        cur
    }

    /// Iterate `id` and every card above it, in order.
    pub fn iter_from(&self, id: CardId) -> impl Iterator<Item = CardId> + '_ {
        let mut cur = Some(id);
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.node(id).next;
            Some(id)
        })
    }

    /// Length of the run from `id` to the top, inclusive.
    #[must_use]
    pub fn run_len(&self, id: CardId) -> usize {
        self.iter_from(id).count()
    }

    /// Number of real cards above the bottom marker of `bottom`'s stack.
    #[must_use]
    pub fn stack_len(&self, bottom: CardId) -> usize {
        self.run_len(bottom) - 1
    }

    /// Shuffle the cards above `bottom` into a uniformly random permutation.
    ///
    /// Insertion shuffle: each card in turn is inserted at a uniformly random
    /// position among the current length + 1 slots, which is uniform over
    /// permutations for a uniform random source.
    pub fn shuffle(&mut self, bottom: CardId, rng: &mut DealRng) {
        let cards: Vec<CardId> = match self.node(bottom).next {
            Some(first) => self.iter_from(first).collect(),
            None => return,
        };
        let mut order: Vec<CardId> = Vec::with_capacity(cards.len());
        for id in cards {
            let node = self.node_mut(id);
            node.prev = None;
            node.next = None;
            let at = rng.gen_range_usize(0..order.len() + 1);
            order.insert(at, id);
        }
        self.node_mut(bottom).next = None;
        let mut tail = bottom;
        for id in order {
            self.link(tail, id);
            tail = id;
        }
    }

    /// Verify prev/next consistency of the stack headed by `bottom`.
    /// Test support; panics on a half-linked pair.
    pub fn assert_consistent(&self, bottom: CardId) {
        assert!(self.node(bottom).prev.is_none(), "bottom has a predecessor");
        let mut cur = bottom;
        while let Some(n) = self.node(cur).next {
            assert_eq!(
                self.node(n).prev,
                Some(cur),
                "dangling half-link between {} and {}",
                cur,
                n
            );
            cur = n;
        }
    }
}
