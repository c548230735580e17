//! Request/Reply Example - Asking, Forwarding, Timeouts
//!
//! A front actor that forwards lookups to a backing store actor. The reply
//! travels straight back to the original caller, and a timed ask shows how
//! an unanswered request is reported.
//!
//! Run with: cargo run --example request_reply

use std::collections::HashMap;
use std::convert::Infallible;
use std::time::Duration;

use strand_rt::prelude::*;

/// Backing store: owns the data, answers lookups.
struct Store {
    entries: HashMap<String, String>,
}

impl Actor for Store {
    type Message = String;
    type Reply = Option<String>;
    type Error = Infallible;

    fn handle(
        &mut self,
        key: String,
        ctx: &mut Context<'_, Option<String>>,
    ) -> Result<(), Infallible> {
        ctx.reply(self.entries.get(&key).cloned());
        Ok(())
    }
}

/// Front door: forwards every lookup to the store. The store's reply
/// resolves the original caller's future; the front actor never sees it.
struct Front {
    store: ActorRef<Store>,
}

impl Actor for Front {
    type Message = String;
    type Reply = Option<String>;
    type Error = Infallible;

    fn handle(
        &mut self,
        key: String,
        ctx: &mut Context<'_, Option<String>>,
    ) -> Result<(), Infallible> {
        ctx.forward(key, &self.store);
        Ok(())
    }
}

/// An actor that never replies, to demonstrate timeouts.
struct BlackHole;

impl Actor for BlackHole {
    type Message = String;
    type Reply = Option<String>;
    type Error = Infallible;

    fn handle(
        &mut self,
        _: String,
        _: &mut Context<'_, Option<String>>,
    ) -> Result<(), Infallible> {
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let mut entries = HashMap::new();
    entries.insert("syrup".to_string(), "maple".to_string());

    let store = ActorBuilder::new(Store { entries }).name("store").spawn();
    let front = ActorBuilder::new(Front {
        store: store.clone(),
    })
    .name("front")
    .spawn();

    // The forwarded lookup answers exactly like a direct one.
    let via_front = front.ask_blocking("syrup".to_string());
    let direct = store.ask_blocking("syrup".to_string());
    println!("via front: {via_front:?}, direct: {direct:?}");
    assert_eq!(via_front, direct);

    // An async ask returns the future immediately.
    let pending = front.ask("missing".to_string());
    println!("missing -> {:?}", pending.wait());

    // Nobody answers a black hole; the timed ask reports absence.
    let black_hole = ActorRef::spawn(BlackHole);
    let answer = black_hole.ask_blocking_timeout("anything".to_string(), Duration::from_millis(100));
    println!("black hole answered: {answer:?}");
    assert!(answer.is_none());
}
