use std::num::NonZeroUsize;
use std::process::Command;

use mmdist::util::max_rel_error;
use mmdist::{Dims, Error, GemmNode, Matrix, ParallelRows, RowPartition, TripleLoop};
use typenum::{U1, U5, U7};

fn assert_matrices_close(expected: &Matrix<f64>, actual: &Matrix<f64>, name: &str) {
    assert_eq!(expected.height(), actual.height(), "{}: height mismatch", name);
    assert_eq!(expected.width(), actual.width(), "{}: width mismatch", name);
    let err = max_rel_error(expected, actual);
    assert!(err <= 1e-9, "{}: max relative error {:e}", name, err);
}

fn threads(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn random_pair(m: usize, k: usize, n: usize) -> (Matrix<f64>, Matrix<f64>) {
    let mut a: Matrix<f64> = Matrix::new(m, k).unwrap();
    let mut b: Matrix<f64> = Matrix::new(k, n).unwrap();
    a.fill_rand();
    b.fill_rand();
    (a, b)
}

fn synthetic_pair(dims: Dims) -> (Matrix<f64>, Matrix<f64>) {
    let mut a: Matrix<f64> = Matrix::new(dims.nra, dims.nca).unwrap();
    let mut b: Matrix<f64> = Matrix::new(dims.nca, dims.ncb).unwrap();
    a.fill_index_sum();
    b.fill_index_product();
    (a, b)
}

fn serial(a: &Matrix<f64>, b: &Matrix<f64>) -> Matrix<f64> {
    let mut c = Matrix::new(a.height(), b.width()).unwrap();
    TripleLoop::new().run(a, b, &mut c).unwrap();
    c
}

// ============================================================
// The worked example: 4x2 times 2x3 over three workers
// ============================================================

#[test]
fn scenario_all_models_agree_with_expected_product() {
    let dims = Dims::new(4, 2, 3).unwrap();
    let (a, b) = synthetic_pair(dims);
    let expected = Matrix::from_vec(
        4,
        3,
        vec![0.0, 1.0, 2.0, 0.0, 2.0, 4.0, 0.0, 3.0, 6.0, 0.0, 4.0, 8.0],
    )
    .unwrap();

    let mut models: Vec<Box<dyn GemmNode<f64>>> = vec![
        Box::new(TripleLoop::new()),
        Box::new(ParallelRows::<U5>::new(threads(3))),
        Box::new(RowPartition::new(4).unwrap()),
    ];
    for model in models.iter_mut() {
        let mut c = Matrix::new(4, 3).unwrap();
        model.run(&a, &b, &mut c).unwrap();
        assert_eq!(c, expected, "{}", model.description());
    }
}

// ============================================================
// Agreement with the serial reference
// ============================================================

#[test]
fn shared_memory_matches_serial_on_random_inputs() {
    let shapes = [(1, 1, 1), (3, 5, 7), (7, 3, 5), (11, 13, 17), (64, 32, 48), (101, 9, 3)];
    for (m, k, n) in shapes {
        let (a, b) = random_pair(m, k, n);
        let expected = serial(&a, &b);

        for t in [1, 2, 3, 8] {
            let mut c = Matrix::new(m, n).unwrap();
            ParallelRows::<U7>::new(threads(t)).run(&a, &b, &mut c).unwrap();
            assert_matrices_close(&expected, &c, &format!("shared {}x{}x{} on {}", m, k, n, t));
        }
    }
}

#[test]
fn message_passing_matches_serial_on_random_inputs() {
    let shapes = [(1, 1, 1), (3, 5, 7), (7, 3, 5), (11, 13, 17), (64, 32, 48), (101, 9, 3)];
    for (m, k, n) in shapes {
        let (a, b) = random_pair(m, k, n);
        let expected = serial(&a, &b);

        for tasks in [2, 3, 5, 9] {
            let mut c = Matrix::new(m, n).unwrap();
            RowPartition::new(tasks).unwrap().run(&a, &b, &mut c).unwrap();
            assert_matrices_close(&expected, &c, &format!("distributed {}x{}x{} on {}", m, k, n, tasks));
        }
    }
}

#[test]
fn more_workers_than_rows() {
    let (a, b) = random_pair(3, 4, 5);
    let expected = serial(&a, &b);

    let mut c = Matrix::new(3, 5).unwrap();
    RowPartition::new(8).unwrap().run(&a, &b, &mut c).unwrap();
    assert_matrices_close(&expected, &c, "7 workers, 3 rows");
}

#[test]
fn more_threads_than_chunks() {
    let (a, b) = random_pair(4, 6, 2);
    let expected = serial(&a, &b);

    let mut c = Matrix::new(4, 2).unwrap();
    ParallelRows::<U1>::new(threads(16)).run(&a, &b, &mut c).unwrap();
    assert_matrices_close(&expected, &c, "16 threads, 4 rows");
}

#[test]
fn synthetic_inputs_on_a_medium_problem() {
    let dims = Dims::new(250, 40, 60).unwrap();
    let (a, b) = synthetic_pair(dims);
    let expected = serial(&a, &b);

    let mut par: ParallelRows = ParallelRows::new(threads(4));
    let (a_par, b_par, c_par) = par.run_all::<f64>(dims).unwrap();
    assert_eq!(a_par, a);
    assert_eq!(b_par, b);
    assert_matrices_close(&expected, &c_par, "shared four phases");

    let mut c = Matrix::new(dims.nra, dims.ncb).unwrap();
    RowPartition::new(7).unwrap().run(&a, &b, &mut c).unwrap();
    assert_matrices_close(&expected, &c, "distributed, 6 workers");
}

// ============================================================
// Failure modes
// ============================================================

#[test]
fn single_task_is_rejected_before_any_work() {
    let err = RowPartition::new(1).err().unwrap();
    assert!(matches!(err, Error::TooFewTasks { available: 1 }));
    assert_eq!(err.to_string(), "at least two tasks are required, 1 available");
}

#[test]
fn nonconformal_inputs_are_rejected_by_every_model() {
    let (a, b) = random_pair(4, 3, 2);
    let mut wrong_c = Matrix::new(4, 3).unwrap();

    let mut models: Vec<Box<dyn GemmNode<f64>>> = vec![
        Box::new(TripleLoop::new()),
        Box::new(ParallelRows::<U5>::new(threads(2))),
        Box::new(RowPartition::new(3).unwrap()),
    ];
    for model in models.iter_mut() {
        let err = model.run(&a, &b, &mut wrong_c).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }), "{}", model.description());
    }
}

#[test]
fn distributed_binary_exits_non_zero_with_one_task() {
    let out = Command::new(env!("CARGO_BIN_EXE_mm_distributed"))
        .args(["--tasks", "1", "--nra", "4", "--nca", "2", "--ncb", "3"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(!out.status.success(), "exit status {:?}", out.status);
    assert!(!stdout.contains("-> initializing matrices"), "stdout: {}", stdout);
    assert!(
        stderr.contains("at least two tasks are required, 1 available"),
        "stderr: {}",
        stderr
    );
}
