extern crate assurance;
extern crate env_logger;
extern crate rand;

use std::cell::RefCell;
use std::rc::Rc;

use rand::prng::XorShiftRng;
use rand::{Rng, SeedableRng};

use assurance::future::make_in;
use assurance::{FutureState, Reason, Schedule, Scheduler};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Action {
    Resolve(u32),
    Reject(u32),
    // Adopt a future that gets fulfilled on the next turn
    Adopt(u32),
}

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    Fulfilled(u32),
    Rejected(String),
}

fn random_actions(rng: &mut XorShiftRng) -> Vec<Action> {
    let len = rng.gen_range(1, 6);
    (0..len)
        .map(|_| {
            let val = rng.gen_range(0, 1000);
            match rng.gen_range(0, 3) {
                0 => Action::Resolve(val),
                1 => Action::Reject(val),
                _ => Action::Adopt(val),
            }
        })
        .collect()
}

/// Adoption never settles synchronously and does not lock the future in, so
/// the first direct settlement wins. Without one, the adopted future that
/// settles first wins.
fn expected(actions: &[Action]) -> Outcome {
    for action in actions {
        match *action {
            Action::Resolve(val) => return Outcome::Fulfilled(val),
            Action::Reject(val) => return Outcome::Rejected(format!("r{}", val)),
            Action::Adopt(..) => {}
        }
    }

    match actions[0] {
        Action::Adopt(val) => Outcome::Fulfilled(val),
        _ => unreachable!(),
    }
}

#[test]
fn test_random_settlement_sequences() {
    let _ = env_logger::try_init();

    let mut rng = XorShiftRng::from_seed([0x5e, 0x77, 0x1e, 0xd0, 0x13, 0x37, 0xca, 0xfe, 0x00,
                                          0x2a, 0x4b, 0x1d, 0x99, 0x0f, 0x6c, 0x81]);

    for round in 0..500 {
        let actions = random_actions(&mut rng);
        let sched = Scheduler::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        let (promise, fut) = make_in::<u32>(sched.handle());
        {
            let fulfilled = calls.clone();
            let rejected = calls.clone();
            fut.then(move |v| {
                         fulfilled.borrow_mut().push(Outcome::Fulfilled(v));
                         Ok(())
                     },
                     move |reason| {
                         rejected.borrow_mut().push(Outcome::Rejected(reason.to_string()));
                         Ok(())
                     });
        }

        for action in &actions {
            match *action {
                Action::Resolve(val) => promise.resolve(val),
                Action::Reject(val) => promise.reject(Reason::new(format!("r{}", val))),
                Action::Adopt(val) => {
                    let (inner_promise, inner) = make_in::<u32>(sched.handle());
                    sched.schedule(Box::new(move || inner_promise.resolve(val)));
                    promise.settle(inner);
                }
            }
        }

        sched.run_until_idle().unwrap();

        let expected = expected(&actions);
        assert_eq!(*calls.borrow(),
                   vec![expected.clone()],
                   "round {}: {:?}",
                   round,
                   actions);

        let state = match expected {
            Outcome::Fulfilled(..) => FutureState::Fulfilled,
            Outcome::Rejected(..) => FutureState::Rejected,
        };
        assert_eq!(fut.state(), state, "round {}: {:?}", round, actions);
    }
}
