//! Framework de testes do módulo
//!
//! Suites rodam na ativação (feature `self_test`), antes de qualquer
//! escrita em registro da plataforma. Um único `Fail` aborta a ativação.

/// Resultado de teste
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

/// Um caso de teste
pub struct TestCase {
    pub name: &'static str,
    pub func: fn() -> TestResult,
}

impl TestCase {
    pub const fn new(name: &'static str, func: fn() -> TestResult) -> Self {
        Self { name, func }
    }
}

/// Contagem de uma suite executada.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SuiteSummary {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Executa suite de testes
pub fn run_test_suite(name: &str, tests: &[TestCase]) -> SuiteSummary {
    crate::kinfo!("(Test) === Executando suite: "; name);

    let mut summary = SuiteSummary::default();

    for test in tests {
        match (test.func)() {
            TestResult::Pass => {
                crate::kdebug!("(Test) [PASS] "; test.name);
                summary.passed += 1;
            }
            TestResult::Fail => {
                crate::kerror!("(Test) [FAIL] "; test.name);
                summary.failed += 1;
            }
            TestResult::Skip => {
                crate::kwarn!("(Test) [SKIP] "; test.name);
                summary.skipped += 1;
            }
        }
    }

    crate::kinfo!("(Test) Resultados: passed=", summary.passed);
    if !summary.is_clean() {
        crate::kerror!("(Test) Resultados: failed=", summary.failed);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> TestResult {
        TestResult::Pass
    }

    fn broken() -> TestResult {
        TestResult::Fail
    }

    fn pending() -> TestResult {
        TestResult::Skip
    }

    #[test]
    fn suite_counts_every_outcome() {
        let suite = [
            TestCase::new("ok", ok),
            TestCase::new("broken", broken),
            TestCase::new("pending", pending),
            TestCase::new("ok_again", ok),
        ];
        let summary = run_test_suite("mixed", &suite);
        assert_eq!(
            summary,
            SuiteSummary {
                passed: 2,
                failed: 1,
                skipped: 1
            }
        );
        assert!(!summary.is_clean());
    }

    #[test]
    fn empty_suite_is_clean() {
        assert!(run_test_suite("empty", &[]).is_clean());
    }
}
