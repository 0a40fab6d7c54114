// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate clap;
#[macro_use]
extern crate log;
extern crate env_logger;

extern crate assurance;

use std::process;
use std::time::Duration;

use clap::{App, Arg};

use assurance::{Future, Options, Reason, Scheduler};

#[derive(Debug, Clone)]
struct Record {
    text: String,
    number: u32,
}

fn main() {
    env_logger::init();

    let matches = App::new("assurance")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(Arg::with_name("DELAY")
            .short("d")
            .long("delay")
            .takes_value(true)
            .help("Milliseconds before the delayed future resolves"))
        .arg(Arg::with_name("MAX_TASKS")
            .short("m")
            .long("max-tasks")
            .takes_value(true)
            .help("Stop after running this many tasks"))
        .get_matches();

    let delay = match matches.value_of("DELAY").unwrap_or("100").parse::<u64>() {
        Ok(delay) => Duration::from_millis(delay),
        Err(err) => {
            eprintln!("invalid --delay: {}", err);
            process::exit(2);
        }
    };

    let mut opts = Options::new();
    opts.name("demo".to_owned());
    if let Some(max) = matches.value_of("MAX_TASKS") {
        match max.parse() {
            Ok(max) => {
                opts.max_tasks(max);
            }
            Err(err) => {
                eprintln!("invalid --max-tasks: {}", err);
                process::exit(2);
            }
        }
    }

    let ret = Scheduler::with_options(opts).run(move || {
        println!("Start...");

        // The rejection comes too late and is ignored
        let fut: Future<String> = Future::new(|promise| {
            promise.resolve("Success!".to_owned());
            promise.reject(Reason::new("Failure!"));
            Ok(())
        });

        fut.and_then(|value| {
                println!("Result: {}", value);
                Ok(value + " appended")
            })
            .and_then(|value| {
                println!("Chain: {}", value);
                Ok(())
            })
            .catch(|reason| {
                println!("Error: {}", reason);
                Ok(())
            });

        let delayed: Future<u32> = Future::new(|promise| {
            let promise = promise.clone();
            assurance::set_timeout(delay, move || {
                promise.resolve(123);
                println!("promise end");
            });
            Ok(())
        });

        delayed.and_then(|result| {
            println!("start result: ");
            println!("{}", result);
            Ok(())
        });

        println!("End...");

        let record: Future<Record> = Future::resolve(Record {
            text: "TEST".to_owned(),
            number: 123,
        });

        record.and_then(|record| {
            debug!("Record: {:?}", record);
            println!("{}", record.text);
            Ok(record.number)
        });
    });

    match ret {
        Ok(()) => info!("All futures settled"),
        Err(err) => {
            error!("{}", err);
            process::exit(1);
        }
    }
}
