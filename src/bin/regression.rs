use labweek::{ColumnSeries, fit, load_table, render_fit_chart, text_table};
use std::env;
use std::error::Error;
use std::process;

struct Options {
    file: String,
    x_column: String,
    y_column: String,
    reciprocal: bool,
    out: Option<String>,
}

fn print_usage() {
    eprintln!(
        "Usage: regression <file> <x-column> <y-column> [--reciprocal] [--out <png>]\n\
         \n\
         Reads one sheet of an .xlsx or .csv file, parses the two named\n\
         columns (plain numbers or \"value ± error\" cells, comma decimals),\n\
         fits a least-squares line, and prints the fit statistics.\n\
         \n\
         Options:\n\
           --reciprocal   Use 1/Y instead of Y\n\
           --out <png>    Also render the scatter + fit chart to a PNG file"
    );
}

fn parse_args(args: &[String]) -> Option<Options> {
    let mut positional = Vec::new();
    let mut reciprocal = false;
    let mut out = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--reciprocal" => reciprocal = true,
            "--out" => out = Some(iter.next()?.clone()),
            _ => positional.push(arg.clone()),
        }
    }

    if positional.len() != 3 {
        return None;
    }
    let mut positional = positional.into_iter();
    Some(Options {
        file: positional.next()?,
        x_column: positional.next()?,
        y_column: positional.next()?,
        reciprocal,
        out,
    })
}

fn run(options: &Options) -> Result<(), Box<dyn Error>> {
    let df = load_table(&options.file)?;
    println!("Loaded {} data rows from {}", df.height(), options.file);
    println!("{}", text_table(&df.head(Some(5))));

    let xs = ColumnSeries::extract(&df, &options.x_column)?;
    let mut ys = ColumnSeries::extract(&df, &options.y_column)?;
    if options.reciprocal {
        ys = ys.reciprocal();
    }

    let result = fit(&xs.values, &ys.values)?;
    println!("{}", result.summary());

    if let Some(path) = &options.out {
        render_fit_chart(&xs, &ys, &result, path)?;
        println!("Chart written to {path}");
    }
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let Some(options) = parse_args(&args) else {
        print_usage();
        process::exit(2);
    };

    if let Err(err) = run(&options) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
