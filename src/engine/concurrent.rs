// src/engine/concurrent.rs
use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
};

use crate::core::html::Document;
use crate::core::net::Fetch;
use crate::engine::types::Verification;
use crate::engine::verify::verify_tree;
use crate::progress::Progress;
use crate::registry::{Check, Target};
use crate::report::{FullReport, TargetReport, VERIFIER_ERROR_LABEL};

/// Fetch and verify every target in parallel.
///
/// One worker per target unless `limit` caps the pool. Each target yields
/// exactly one report, failures included, and the result keeps the input
/// order regardless of completion order. A panicking verifier is caught
/// and recorded as that target's single diagnostic result.
pub fn run_all(
    targets: &[Target],
    fetcher: &dyn Fetch,
    limit: Option<usize>,
    mut progress: Option<&mut dyn Progress>,
) -> FullReport {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(targets.len());
    }
    if targets.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        return FullReport::default();
    }

    let workers = limit.unwrap_or(targets.len()).clamp(1, targets.len());
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, TargetReport)>();
    let mut slots: Vec<Option<TargetReport>> = vec![None; targets.len()];

    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(target) = targets.get(i) else { break };
                    let report = panic::catch_unwind(AssertUnwindSafe(|| check_target(target, fetcher)))
                        .unwrap_or_else(|payload| {
                            let reason = join!("verifier panicked: ", panic_message(&*payload));
                            loge!("{}: {reason}", target.name());
                            TargetReport::single_failure(target.name(), target.url(), VERIFIER_ERROR_LABEL, reason)
                        });
                    if tx.send((i, report)).is_err() {
                        break;
                    }
                })
            })
            .collect();
        drop(tx); // workers hold the only senders now

        for (i, report) in rx {
            if let Some(p) = progress.as_deref_mut() {
                if report.all_pass {
                    p.target_done(&report.name);
                } else {
                    p.target_failed(&report.name);
                }
            }
            slots[i] = Some(report);
        }

        for h in handles {
            if let Err(payload) = h.join() {
                loge!("worker thread died: {}", panic_message(&*payload));
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let reports = slots
        .into_iter()
        .zip(targets)
        .map(|(slot, t)| {
            slot.unwrap_or_else(|| {
                TargetReport::single_failure(t.name(), t.url(), VERIFIER_ERROR_LABEL, "worker produced no report")
            })
        })
        .collect();
    FullReport::new(reports)
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}

/// One target, start to finish. Never fails; fetch problems become the
/// report's single diagnostic result.
pub fn check_target(target: &Target, fetcher: &dyn Fetch) -> TargetReport {
    logf!("checking {} at {}", target.name(), target.url());

    let doc = match fetcher.fetch(target.url()) {
        Ok(doc) => doc,
        Err(e) => {
            loge!("{}: {e}", target.name());
            return TargetReport::fetch_failed(target.name(), target.url(), e.to_string());
        }
    };

    let verification = verify_target(target, &doc);
    if !verification.all_pass {
        logw!(
            "{}: {} of {} check(s) failed",
            target.name(),
            verification.results.iter().filter(|r| !r.passed()).count(),
            verification.results.len()
        );
    }
    TargetReport::from_verification(target.name(), target.url(), verification)
}

pub fn verify_target(target: &Target, doc: &Document) -> Verification {
    match &target.check {
        Check::Tree(tree) => verify_tree(tree, doc),
        Check::Custom(verifier) => {
            let mut v = Verification::default();
            v.extend(verifier.verify(target, doc));
            v
        }
    }
}
