//! Getting Started Example - Your First Actor
//!
//! A counter actor that handles increments fire-and-forget and answers
//! queries through the blocking request/response overlay.
//!
//! Run with: cargo run --example getting_started

use std::convert::Infallible;

use strand_rt::prelude::*;

// Step 1: Define your messages
enum CounterMessage {
    Increment(u64),
    Reset,
}

// Step 2: Define your actor and its private state
struct CounterActor {
    value: u64,
}

// Step 3: Implement the Actor trait
impl Actor for CounterActor {
    type Message = CounterMessage;
    type Reply = u64;
    type Error = Infallible;

    fn handle(
        &mut self,
        message: CounterMessage,
        ctx: &mut Context<'_, u64>,
    ) -> Result<(), Infallible> {
        match message {
            CounterMessage::Increment(by) => self.value += by,
            CounterMessage::Reset => self.value = 0,
        }
        // For an `ask` this answers the caller; for a `send` it is a no-op.
        ctx.reply(self.value);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    // Step 4: Spawn and use your actor
    let counter = ActorBuilder::new(CounterActor { value: 0 })
        .name("counter")
        .spawn();

    // Fire-and-forget sends; nobody waits for these.
    for _ in 0..9 {
        counter.send(CounterMessage::Increment(1));
    }

    // A blocking ask both increments and reads the result.
    let value = counter.ask_blocking(CounterMessage::Increment(1));
    println!("counter is now {value}");
    assert_eq!(value, 10);

    let value = counter.ask_blocking(CounterMessage::Reset);
    println!("after reset: {value}");
}
