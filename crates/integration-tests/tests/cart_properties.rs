//! Property tests over arbitrary click sequences.

#![allow(clippy::unwrap_used)]

use std::collections::HashSet;

use apple_cart_core::{Cart, Price, ProductId};
use apple_cart_integration_tests::{iphone_page, mac_page, navigate, open};
use apple_cart_storefront::page::CHECKOUT_BUTTON_ID;
use apple_cart_storefront::storage::load_cart;
use apple_cart_storefront::{ClickTarget, Dispatched, MemoryStore};
use proptest::collection::vec;
use proptest::prelude::*;

const PRODUCTS: [&str; 4] = ["iphone-15", "iphone-15-pro", "macbook-air", "ghost"];

#[derive(Clone, Debug)]
enum Action {
    Add(usize),
    Remove(usize),
    Checkout,
    Navigate,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => (0..PRODUCTS.len()).prop_map(Action::Add),
        3 => (0..PRODUCTS.len()).prop_map(Action::Remove),
        1 => Just(Action::Checkout),
        1 => Just(Action::Navigate),
    ]
}

fn product(index: usize) -> ProductId {
    ProductId::new(PRODUCTS.get(index).copied().unwrap_or("ghost"))
}

fn assert_invariants(cart: &Cart) -> Result<(), TestCaseError> {
    let mut ids = HashSet::new();
    for item in cart.items() {
        prop_assert!(item.quantity.get() >= 1);
        prop_assert!(ids.insert(item.id.clone()), "duplicate id {}", item.id);
    }
    let expected: u64 = cart
        .items()
        .iter()
        .map(|item| item.price.amount() * u64::from(item.quantity.get()))
        .sum();
    prop_assert_eq!(cart.total(), Price::new(expected));
    Ok(())
}

proptest! {
    #[test]
    fn prop_click_sequences_keep_invariants_and_persist(actions in vec(action_strategy(), 0..40)) {
        let mut on_mac = false;
        let mut session = open(&iphone_page(), MemoryStore::new()).unwrap();

        for action in actions {
            match action {
                Action::Add(i) => {
                    session.click(&ClickTarget::add_to_cart(&product(i))).unwrap();
                }
                Action::Remove(i) => {
                    session.click(&ClickTarget::remove_from_cart(&product(i))).unwrap();
                }
                Action::Checkout => {
                    let was_empty = session.controller().cart().is_empty();
                    let result = session.click(&ClickTarget::by_id(CHECKOUT_BUTTON_ID)).unwrap();
                    if was_empty {
                        // Disabled control: the click never reaches checkout
                        prop_assert!(matches!(result, Dispatched::Ignored));
                    } else {
                        prop_assert!(matches!(result, Dispatched::OrderPlaced(_)));
                    }
                    prop_assert!(session.controller().cart().is_empty());
                }
                Action::Navigate => {
                    let before = session.controller().cart().clone();
                    on_mac = !on_mac;
                    let html = if on_mac { mac_page() } else { iphone_page() };
                    session = navigate(session, &html).unwrap();
                    prop_assert_eq!(session.controller().cart(), &before);
                }
            }

            let controller = session.controller();
            assert_invariants(controller.cart())?;
            prop_assert_eq!(&load_cart(controller.store(), "appleCart"), controller.cart());

            let display = controller.display().unwrap();
            prop_assert_eq!(&display.total_text, &controller.cart().total().format_grouped());
            prop_assert_eq!(display.checkout_disabled, controller.cart().is_empty());
        }
    }

    #[test]
    fn prop_add_then_remove_restores_cart(
        adds in vec(0..3usize, 0..10),
        extra in 0..3usize,
    ) {
        let mut session = open(&iphone_page(), MemoryStore::new()).unwrap();
        for i in &adds {
            session.click(&ClickTarget::add_to_cart(&product(*i))).unwrap();
        }
        let before = session.controller().cart().clone();

        let id = product(extra);
        let added = session.click(&ClickTarget::add_to_cart(&id)).unwrap();
        if matches!(added, Dispatched::Added(_)) {
            session.click(&ClickTarget::remove_from_cart(&id)).unwrap();
        }
        prop_assert_eq!(session.controller().cart(), &before);
    }
}
