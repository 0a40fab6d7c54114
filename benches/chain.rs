// Copyright 2026 The assurance Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate assurance;
extern crate time;

use assurance::{Future, Scheduler};

const NS_PER_MS: u64 = 1_000_000;
const ROUNDS: usize = 10;

#[derive(Clone, Copy)]
struct Result {
    build: u64,
    drain: u64,
    tasks: usize,
}

#[inline]
fn rdiv(a: u64, b: u64) -> u64 {
    (a + (b / 2)) / b
}

/// `len` continuations, each one depending on the previous
fn run_chain(len: usize) -> Result {
    let sched = Scheduler::new();
    let _enter = sched.enter();

    let beg = time::precise_time_ns();

    let mut fut: Future<u64> = Future::resolve(0);
    for _ in 0..len {
        fut = fut.and_then(|v| Ok(v + 1));
    }

    let mid = time::precise_time_ns();
    let tasks = sched.run_until_idle().unwrap();
    let end = time::precise_time_ns();

    assert_eq!(fut.peek().unwrap().unwrap(), len as u64);

    Result {
        build: mid - beg,
        drain: end - mid,
        tasks: tasks,
    }
}

/// `len` continuations on the same future
fn run_fan_out(len: usize) -> Result {
    let sched = Scheduler::new();
    let _enter = sched.enter();

    let beg = time::precise_time_ns();

    let (promise, fut) = assurance::future::make::<u64>();
    let derived: Vec<Future<u64>> = (0..len).map(|_| fut.and_then(|v| Ok(v * 2))).collect();
    promise.resolve(21);

    let mid = time::precise_time_ns();
    let tasks = sched.run_until_idle().unwrap();
    let end = time::precise_time_ns();

    assert!(derived.iter().all(|fut| fut.peek().unwrap().unwrap() == 42));

    Result {
        build: mid - beg,
        drain: end - mid,
        tasks: tasks,
    }
}

/// `len` futures, each adopting the previous one
fn run_adoption(len: usize) -> Result {
    let sched = Scheduler::new();
    let _enter = sched.enter();

    let beg = time::precise_time_ns();

    let (promise, mut fut) = assurance::future::make::<u64>();
    for _ in 0..len {
        fut = Future::resolve(fut);
    }
    promise.resolve(7);

    let mid = time::precise_time_ns();
    let tasks = sched.run_until_idle().unwrap();
    let end = time::precise_time_ns();

    assert_eq!(fut.peek().unwrap().unwrap(), 7);

    Result {
        build: mid - beg,
        drain: end - mid,
        tasks: tasks,
    }
}

fn report(name: &str, len: usize, results: &[Result], csv: bool) {
    for r in results.iter() {
        let tasks = r.tasks as u64;
        if csv {
            println!("{};{};{};{}",
                     name,
                     len,
                     rdiv(r.build, len as u64),
                     rdiv(r.drain, tasks));
        }
    }

    if csv {
        return;
    }

    let build = results.iter().fold(0, |acc, r| acc + rdiv(r.build, len as u64));
    let drain = results.iter().fold(0, |acc, r| acc + rdiv(r.drain, r.tasks as u64));
    let total = results.iter().fold(0, |acc, r| acc + r.build + r.drain);

    println!("\n==== {} x{} ====\n", name, len);
    println!("{} rounds in {} ms", results.len(), rdiv(total, NS_PER_MS));
    println!("Avg: {} ns/registration, {} ns/task",
             rdiv(build, results.len() as u64),
             rdiv(drain, results.len() as u64));
}

// Run this with
//   cargo bench --bench chain -- --csv
// to get one `name;length;ns/registration;ns/task` line per round.
fn main() {
    let csv = std::env::args().any(|arg| arg == "--csv");

    for &len in &[1_000, 10_000, 100_000] {
        let chain: Vec<Result> = (0..ROUNDS).map(|_| run_chain(len)).collect();
        report("chain", len, &chain, csv);

        let fan_out: Vec<Result> = (0..ROUNDS).map(|_| run_fan_out(len)).collect();
        report("fan-out", len, &fan_out, csv);

        let adoption: Vec<Result> = (0..ROUNDS).map(|_| run_adoption(len)).collect();
        report("adoption", len, &adoption, csv);
    }
}
