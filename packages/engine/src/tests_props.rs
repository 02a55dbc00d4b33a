//! Property tests for shuffling, ranking, and trick resolution.

use proptest::prelude::*;

use crate::bids_types::{catalog, BidCategory, BidDecks};
use crate::cards_logic::{base_rank, card_beats, is_trump, lead_rank};
use crate::cards_types::{Card, CardId, Suit, DECK_SIZE};
use crate::deck::shuffle_with_seed;

fn any_card() -> impl Strategy<Value = Card> {
    (0u8..DECK_SIZE as u8).prop_map(|raw| Card::from_id(CardId(raw)).unwrap())
}

fn any_lead() -> impl Strategy<Value = Option<Suit>> {
    prop_oneof![
        Just(None),
        Just(Some(Suit::Acorns)),
        Just(Some(Suit::Leaves)),
        Just(Some(Suit::Berries)),
    ]
}

fn distinct_cards(n: usize) -> impl Strategy<Value = Vec<Card>> {
    proptest::sample::subsequence((0u8..DECK_SIZE as u8).collect::<Vec<_>>(), n)
        .prop_shuffle()
        .prop_map(|ids| {
            ids.into_iter()
                .map(|raw| Card::from_id(CardId(raw)).unwrap())
                .collect()
        })
}

/// Straight fold over plays, exactly as the trick engine updates its best.
fn fold_winner(cards: &[Card], lead: Option<Suit>) -> usize {
    let mut best = 0;
    for (i, &card) in cards.iter().enumerate().skip(1) {
        if card_beats(card, cards[best], lead) {
            best = i;
        }
    }
    best
}

/// Independent oracle: highest trump if any trump was played, otherwise the
/// highest card of the lead suit.
fn oracle_winner(cards: &[Card], lead: Option<Suit>) -> usize {
    let trumps: Vec<usize> = (0..cards.len()).filter(|&i| is_trump(cards[i])).collect();
    if let Some(&first) = trumps.first() {
        return trumps
            .into_iter()
            .max_by_key(|&i| base_rank(cards[i]))
            .unwrap_or(first);
    }
    let lead = lead.expect("non-trump opener always sets a lead suit");
    (0..cards.len())
        .filter(|&i| cards[i].suit == lead)
        .max_by_key(|&i| lead_rank(cards[i]).unwrap_or(0))
        .expect("the opener itself follows the lead suit")
}

proptest! {
    #[test]
    fn shuffle_is_always_a_permutation(seed in any::<u64>()) {
        let mut items: Vec<u8> = (0..DECK_SIZE as u8).collect();
        shuffle_with_seed(&mut items, seed);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..DECK_SIZE as u8).collect::<Vec<_>>());
    }

    #[test]
    fn pool_always_holds_three_per_category(seed in any::<i64>(), round_no in 1u8..=50) {
        let defs = catalog();
        let mut decks = BidDecks::from_catalog(&defs);
        let pool = decks.deal_pool(seed, round_no);
        prop_assert_eq!(pool.len(), 9);
        for category in [BidCategory::Points, BidCategory::SetCollection, BidCategory::Tricks] {
            let n = pool.iter()
                .filter(|id| defs[id.0 as usize].category() == category)
                .count();
            prop_assert_eq!(n, 3);
        }
    }

    #[test]
    fn contenders_never_tie(cards in distinct_cards(2), lead in any_lead()) {
        let (a, b) = (cards[0], cards[1]);
        // Two cards that can both contend for a trick (both trump, or both
        // on the lead suit) always compare strictly.
        let contenders = (is_trump(a) && is_trump(b))
            || (lead == Some(a.suit) && a.suit == b.suit);
        if contenders {
            prop_assert_ne!(
                card_beats(a, b, lead),
                card_beats(b, a, lead),
                "{} vs {} under {:?}", a, b, lead
            );
        }
    }

    #[test]
    fn beats_is_asymmetric(cards in distinct_cards(2), lead in any_lead()) {
        let (a, b) = (cards[0], cards[1]);
        prop_assert!(!(card_beats(a, b, lead) && card_beats(b, a, lead)));
    }

    #[test]
    fn fold_matches_oracle(cards in distinct_cards(4)) {
        let lead = if is_trump(cards[0]) { None } else { Some(cards[0].suit) };
        prop_assert_eq!(fold_winner(&cards, lead), oracle_winner(&cards, lead));
    }

    #[test]
    fn trump_beats_any_plain_card(cards in distinct_cards(2), lead in any_lead()) {
        let (a, b) = (cards[0], cards[1]);
        if is_trump(a) && !is_trump(b) {
            prop_assert!(card_beats(a, b, lead));
            prop_assert!(!card_beats(b, a, lead));
        }
    }
}
