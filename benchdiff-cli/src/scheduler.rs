//! Revision-Switch Scheduler
//!
//! Executes every merged case under whichever revision(s) it exists in,
//! switching the working tree as few times as the greedy in-order policy
//! allows. Revision switches are expensive, externally visible side
//! effects, so the current revision is tracked as an explicit state value
//! and every transition is logged.
//!
//! The policy is deliberately not switch-count-optimal: cases are never
//! reordered, because the report depends on catalog-order execution being
//! reproducible. The run always starts and ends on the changes revision.
//!
//! A failed case run is recovered (logged, no result for that revision);
//! a failed switch is fatal.

use benchdiff_core::{Executable, MergedCase, Revision};

/// Which revision the working tree currently has checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevisionState {
    /// The candidate revision, where the run starts and ends.
    OnChanges,
    /// The base revision.
    OnBase,
}

impl RevisionState {
    fn revision(self) -> Revision {
        match self {
            RevisionState::OnChanges => Revision::Changes,
            RevisionState::OnBase => Revision::Base,
        }
    }
}

/// Seam between the scheduling policy and its side effects.
///
/// The production implementation checks out git revisions and spawns
/// harness processes; tests drive the policy with a recording fake.
pub trait Workbench {
    /// Switch the working tree to the given revision. Fatal on failure.
    fn switch(&mut self, revision: Revision) -> anyhow::Result<()>;

    /// Execute one case under the given revision. Failures are recovered
    /// by the scheduler.
    fn run_case(
        &mut self,
        executable: &Executable,
        case: &str,
        revision: Revision,
    ) -> anyhow::Result<()>;
}

/// Run every merged case in catalog order, returning the number of
/// revision switches performed.
pub fn run_schedule<W: Workbench>(bench: &mut W, cases: &[MergedCase]) -> anyhow::Result<u32> {
    let mut state = RevisionState::OnChanges;
    let mut switches = 0u32;

    let mut ensure = |bench: &mut W,
                      state: &mut RevisionState,
                      switches: &mut u32,
                      wanted: RevisionState|
     -> anyhow::Result<()> {
        if *state != wanted {
            tracing::info!(to = %wanted.revision(), "switching revision");
            bench.switch(wanted.revision())?;
            *state = wanted;
            *switches += 1;
        }
        Ok(())
    };

    for case in cases {
        if let Some(executable) = &case.changes {
            ensure(bench, &mut state, &mut switches, RevisionState::OnChanges)?;
            if let Err(error) = bench.run_case(executable, &case.name, Revision::Changes) {
                tracing::warn!(case = %case.name, %error, "changes run failed; no result for this revision");
            }
        }
        if let Some(executable) = &case.base {
            ensure(bench, &mut state, &mut switches, RevisionState::OnBase)?;
            if let Err(error) = bench.run_case(executable, &case.name, Revision::Base) {
                tracing::warn!(case = %case.name, %error, "base run failed; no result for this revision");
            }
        }
    }

    // Leave the tree the way the caller expects it.
    ensure(bench, &mut state, &mut switches, RevisionState::OnChanges)?;

    Ok(switches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchdiff_core::ExecutableKind;
    use std::path::PathBuf;

    #[derive(Debug, PartialEq, Eq)]
    enum Op {
        Switch(Revision),
        Run(String, Revision),
    }

    #[derive(Default)]
    struct FakeBench {
        ops: Vec<Op>,
        failing_cases: Vec<(String, Revision)>,
    }

    impl Workbench for FakeBench {
        fn switch(&mut self, revision: Revision) -> anyhow::Result<()> {
            self.ops.push(Op::Switch(revision));
            Ok(())
        }

        fn run_case(
            &mut self,
            _executable: &Executable,
            case: &str,
            revision: Revision,
        ) -> anyhow::Result<()> {
            self.ops.push(Op::Run(case.to_string(), revision));
            if self.failing_cases.contains(&(case.to_string(), revision)) {
                anyhow::bail!("simulated case failure");
            }
            Ok(())
        }
    }

    fn exe(path: &str) -> Executable {
        Executable {
            name: "suite".to_string(),
            kind: ExecutableKind::Bench,
            path: PathBuf::from(path),
        }
    }

    fn case(name: &str, base: bool, changes: bool) -> MergedCase {
        MergedCase {
            name: name.to_string(),
            base: base.then(|| exe("/base/suite")),
            changes: changes.then(|| exe("/changes/suite")),
        }
    }

    #[test]
    fn both_sided_case_runs_changes_first_then_switches() {
        let mut bench = FakeBench::default();
        let switches = run_schedule(&mut bench, &[case("a", true, true)]).unwrap();

        assert_eq!(
            bench.ops,
            vec![
                Op::Run("a".to_string(), Revision::Changes),
                Op::Switch(Revision::Base),
                Op::Run("a".to_string(), Revision::Base),
                Op::Switch(Revision::Changes),
            ]
        );
        assert_eq!(switches, 2);
    }

    #[test]
    fn consecutive_cases_do_not_switch_redundantly() {
        let mut bench = FakeBench::default();
        // Two base-only cases: one switch there, one switch back.
        let cases = [case("a", true, false), case("b", true, false)];
        let switches = run_schedule(&mut bench, &cases).unwrap();

        assert_eq!(
            bench.ops,
            vec![
                Op::Switch(Revision::Base),
                Op::Run("a".to_string(), Revision::Base),
                Op::Run("b".to_string(), Revision::Base),
                Op::Switch(Revision::Changes),
            ]
        );
        assert_eq!(switches, 2);
    }

    #[test]
    fn changes_only_schedule_never_switches() {
        let mut bench = FakeBench::default();
        let cases = [case("a", false, true), case("b", false, true)];
        let switches = run_schedule(&mut bench, &cases).unwrap();
        assert_eq!(switches, 0);
        assert!(bench.ops.iter().all(|op| matches!(op, Op::Run(_, Revision::Changes))));
    }

    #[test]
    fn execution_follows_catalog_order() {
        let mut bench = FakeBench::default();
        let cases = [
            case("a", true, true),
            case("b", false, true),
            case("c", true, false),
        ];
        run_schedule(&mut bench, &cases).unwrap();

        let runs: Vec<&Op> = bench.ops.iter().filter(|op| matches!(op, Op::Run(..))).collect();
        assert_eq!(
            runs,
            vec![
                &Op::Run("a".to_string(), Revision::Changes),
                &Op::Run("a".to_string(), Revision::Base),
                &Op::Run("b".to_string(), Revision::Changes),
                &Op::Run("c".to_string(), Revision::Base),
            ]
        );
    }

    #[test]
    fn failed_case_is_recovered_and_the_loop_continues() {
        let mut bench = FakeBench {
            failing_cases: vec![("a".to_string(), Revision::Changes)],
            ..Default::default()
        };
        let cases = [case("a", false, true), case("b", false, true)];
        run_schedule(&mut bench, &cases).unwrap();

        // Both cases were attempted despite the first failing.
        assert_eq!(
            bench.ops,
            vec![
                Op::Run("a".to_string(), Revision::Changes),
                Op::Run("b".to_string(), Revision::Changes),
            ]
        );
    }

    #[test]
    fn terminal_state_is_always_changes() {
        let mut bench = FakeBench::default();
        // Ends with a base-side run, forcing a final switch back.
        let cases = [case("z", true, false)];
        run_schedule(&mut bench, &cases).unwrap();
        assert_eq!(bench.ops.last(), Some(&Op::Switch(Revision::Changes)));
    }
}
