//! Priority Messages Example - An Urgent Lane
//!
//! A worker that processes jobs in arrival order but drains control
//! messages (anything starting with '!') first, plus a batch wrapper that
//! brackets every drain.
//!
//! Run with: cargo run --example priority_messages

use std::convert::Infallible;
use std::time::Duration;

use strand_rt::prelude::*;

struct JobWorker {
    processed: Vec<String>,
}

impl Actor for JobWorker {
    type Message = String;
    type Reply = Vec<String>;
    type Error = Infallible;

    const HAS_PRIORITY_HANDLER: bool = true;

    fn handle(
        &mut self,
        job: String,
        ctx: &mut Context<'_, Vec<String>>,
    ) -> Result<(), Infallible> {
        if job == "report" {
            ctx.reply(self.processed.clone());
            return Ok(());
        }
        // Pretend the job takes a moment.
        std::thread::sleep(Duration::from_millis(5));
        self.processed.push(job);
        Ok(())
    }

    fn accepts_priority(&self, message: &String) -> bool {
        message.starts_with('!')
    }

    fn handle_priority(
        &mut self,
        control: String,
        _: &mut Context<'_, Vec<String>>,
    ) -> Result<(), Infallible> {
        self.processed.push(control);
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let worker = ActorBuilder::new(JobWorker {
        processed: Vec::new(),
    })
    .name("job-worker")
    .wrap(|batch: &mut dyn FnMut()| {
        println!("-- batch start");
        batch();
        println!("-- batch end");
    })
    .spawn();

    // Queue ordinary jobs, then an urgent control message. The control
    // message overtakes every job still waiting in the mailbox.
    for n in 1..=5 {
        worker.send(format!("job-{n}"));
    }
    worker.send("!flush".to_string());

    let processed = worker.ask_blocking("report".to_string());
    println!("processed in order: {processed:?}");

    // "!flush" ran before most ordinary jobs even though it was sent last.
    let flush_position = processed.iter().position(|j| j == "!flush");
    println!("!flush position: {flush_position:?}");
}
