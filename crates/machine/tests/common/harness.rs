use std::cell::RefCell;
use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use uniproc_core::{BufferSink, Computer, Os, Result, RunStats, SchedulingAlgorithm};

/// Installs a test-friendly subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A computer whose `PRINTLN` output is captured in memory.
pub struct TestContext {
    pub computer: Computer,
    pub output: Rc<RefCell<BufferSink>>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(8, 16)
    }
}

impl TestContext {
    pub fn new(registers: i32, ram_size: i32) -> Self {
        init_tracing();

        let output = BufferSink::shared();
        let mut computer = Computer::new();
        computer.set_output(output.clone()).unwrap();
        computer.set_cpu(registers).unwrap();
        computer.set_ram(ram_size).unwrap();

        Self { computer, output }
    }

    /// Installs an OS with `algorithm`, locking the computer.
    pub fn boot(&mut self, algorithm: SchedulingAlgorithm) -> Os {
        self.computer.install_os(algorithm).unwrap()
    }

    /// Values printed so far.
    pub fn printed(&self) -> Vec<i32> {
        self.output.borrow().values().to_vec()
    }
}

/// Boots a fresh default computer and runs one batch.
///
/// Returns the run outcome, the printed values and the statistics.
pub fn run_batch<S: AsRef<str>>(
    algorithm: SchedulingAlgorithm,
    programs: &[S],
) -> (Result<()>, Vec<i32>, RunStats) {
    let mut ctx = TestContext::default();
    let os = ctx.boot(algorithm);
    let outcome = os.execute_programs(programs);
    (outcome, ctx.printed(), os.stats())
}

/// A program that sets `R<id>` to `id` and then prints it `prints` times.
///
/// Its length is `prints + 1` instructions.
pub fn printer(id: i32, prints: usize) -> String {
    let mut text = format!("SET R{id} {id}\n");
    for _ in 0..prints {
        text.push_str(&format!("PRINTLN R{id}\n"));
    }
    text
}
