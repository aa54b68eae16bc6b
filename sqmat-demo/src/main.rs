use std::{env, error::Error, fs::File, process::ExitCode};

use sqmat_core::{SqmatError, SquareMatrix, SumOrd};

const LOG_FILE: &str = "log.txt";

fn init_logging(to_stderr: bool) -> Result<(), Box<dyn Error>> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"));
    if !to_stderr {
        // Truncated on every run
        let file = File::create(LOG_FILE)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run() -> Result<(), SqmatError> {
    let mut a = SquareMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]])?;
    let mut b = SquareMatrix::from_rows(vec![vec![4.0, 3.0], vec![2.0, 1.0]])?;

    println!("\nMatrix A:\n{a}");
    println!("Matrix B:\n{b}");

    println!("A + B:\n{}", (&a + &b)?);
    a.add_assign(&b)?;
    println!("A after A += B:\n{a}");
    a.sub_assign(&b)?;
    println!("A after A -= B:\n{a}");

    println!("A - B:\n{}", (&a - &b)?);
    println!("A * B:\n{}", (&a * &b)?);
    println!("A % B (element-wise):\n{}", (&a % &b)?);
    println!("A * 2:\n{}", (&a * 2.0)?);
    println!("A / 2:\n{}", (&a / 2.0)?);
    println!("B % 2:\n{}", (&b % 2)?);

    a.transpose()?;
    println!("Transpose of A:\n{a}");

    println!("Det(A): {}", (!&a)?);
    println!("Det(B): {}", (!&b)?);

    println!("A == B: {}", a.sum_eq(&b)?);
    println!("A > B: {}", a.sum_gt(&b)?);

    println!("\nB ^ 2:\n{}", (&b ^ 2)?);

    a.post_increment()?;
    println!("A after A++:\n{a}");
    b.decrement()?;
    println!("B after --B:\n{b}");

    // Reading an unset cell is reported, not defaulted
    let unset = SquareMatrix::new(2)?;
    println!("Unset matrix:\n{unset}");
    if let Err(err) = &a * &unset {
        println!("A * unset: {err}");
    }
    Ok(())
}

fn main() -> ExitCode {
    let to_stderr = env::args().skip(1).any(|arg| arg == "--stderr");
    if let Err(e) = init_logging(to_stderr) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    log::info!("Starting square matrix demo");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = match err {
                SqmatError::LogicError(_) => "LogicError",
                SqmatError::RowIndexOutOfBounds { .. } => "RowIndexOutOfBounds",
                SqmatError::IndexOutOfBounds { .. } => "IndexOutOfBounds",
                SqmatError::InvalidSize(_) => "InvalidSize",
            };
            eprintln!("\n{kind}: {err}");
            log::warn!("Demo stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
