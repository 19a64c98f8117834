use std::fs::File;
use std::io::{BufReader, Write};

use clap::{App, AppSettings, Arg};
use stdinout::{Input, OrExit, Output};

use udtree::graph::{DepTree, HeadMap};
use udtree_binarize::{
    has_crossing, Binarizer, Error, LiftProjectivizer, ObliquenessTable, Projectivize, SexpEmitter,
};
use udtree_conllu::io::{ReadSentence, Reader};

fn main() {
    let matches = build().get_matches();

    let in_path = matches.value_of(INPUT).map(ToOwned::to_owned);
    let input = Input::from(in_path);
    let reader = Reader::new(BufReader::new(
        input.buf_read().or_exit("Can't open input reader.", 1),
    ));

    let out_path = matches.value_of(OUTPUT).map(ToOwned::to_owned);
    let output = Output::from(out_path);
    let mut writer = output.write().or_exit("Can't open output writer.", 1);

    let table = match matches.value_of(HIERARCHY) {
        Some(path) => {
            let file = File::open(path).or_exit("Can't open obliqueness hierarchy.", 1);
            ObliquenessTable::from_json(BufReader::new(file))
                .or_exit("Can't read obliqueness hierarchy.", 1)
        }
        None => ObliquenessTable::ud2(),
    };

    let projectivize = matches.is_present(PROJECTIVIZE);
    let pretty = matches.is_present(PRETTY);

    let projectivizer = LiftProjectivizer::new();
    let binarizer = Binarizer::new(&table);
    let emitter = SexpEmitter::new();

    for tree in reader {
        let mut tree = tree.or_exit("Could not read sentence.", 1);

        let sent_id = tree.metadata().sent_id().unwrap_or("None").to_owned();
        let text = tree.metadata().text().unwrap_or("None").to_owned();

        match convert(&mut tree, projectivize, &projectivizer, &binarizer, &emitter) {
            Ok(sexp) => {
                let sexp = if pretty { pretty_sexp(&sexp) } else { sexp };
                writeln!(writer, "# sent_id = {}", sent_id)
                    .and_then(|_| writeln!(writer, "# text = {}", text))
                    .and_then(|_| writeln!(writer, "{}\n", sexp))
                    .or_exit("Can't write to output.", 1);
            }
            Err(err) => eprintln!("Skipping sentence {}: {}", sent_id, err),
        }
    }
}

/// Convert one sentence to its head-marked s-expression.
///
/// The head map is captured before any lifting, so branch marking
/// always follows the original head assignment. Without `projectivize`,
/// non-projective sentences pass through with crossing arcs unresolved;
/// binarization still proceeds, with degraded adjacency.
fn convert(
    tree: &mut DepTree,
    projectivize: bool,
    projectivizer: &LiftProjectivizer,
    binarizer: &Binarizer,
    emitter: &SexpEmitter,
) -> Result<String, Error> {
    tree.validate()?;

    let heads = HeadMap::from_tree(tree)?;

    if projectivize && has_crossing(tree) {
        projectivizer.projectivize(tree)?;
    }

    let btree = binarizer.binarize(tree)?;

    Ok(emitter.emit(tree, &btree, &heads))
}

/// Reformat a single-line s-expression into an indented multi-line
/// form, breaking after every closing bracket that is not followed by
/// another and aligning the next line under the matching open bracket.
fn pretty_sexp(sexp: &str) -> String {
    let bytes = sexp.as_bytes();
    let mut pretty = String::new();
    let mut opening: Vec<usize> = Vec::new();
    let mut break_point = 0;
    let mut offset = 0;

    for i in 0..bytes.len().saturating_sub(1) {
        match bytes[i] {
            b'(' => opening.push(i - offset),
            b')' => {
                if bytes[i + 1] == b')' {
                    opening.pop();
                } else if let Some(column) = opening.pop() {
                    pretty.push_str(&sexp[break_point..=i]);
                    pretty.push('\n');
                    pretty.push_str(&" ".repeat(column));
                    offset = i - column + 1;
                    break_point = i + 1;
                }
            }
            _ => (),
        }
    }

    pretty.push_str(&sexp[break_point..]);
    pretty
}

static INPUT: &str = "INPUT";
static OUTPUT: &str = "OUTPUT";
static HIERARCHY: &str = "HIERARCHY";
static PRETTY: &str = "PRETTY";
static PROJECTIVIZE: &str = "PROJECTIVIZE";

static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

fn build<'a, 'b>() -> App<'a, 'b> {
    App::new("ud-binarize")
        .settings(DEFAULT_CLAP_SETTINGS)
        .version("0.1")
        .arg(
            Arg::with_name(INPUT)
                .long("input_file")
                .takes_value(true)
                .help("CoNLL-U input file"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .long("output_file")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(HIERARCHY)
                .long("hierarchy")
                .takes_value(true)
                .help("JSON obliqueness hierarchy (default: built-in UD v2)"),
        )
        .arg(
            Arg::with_name(PROJECTIVIZE)
                .long("projectivize")
                .help("Lift crossing arcs of non-projective sentences before binarization."),
        )
        .arg(
            Arg::with_name(PRETTY)
                .long("pretty")
                .help("Pretty-print the bracketed expressions."),
        )
}

#[cfg(test)]
mod tests {
    use super::pretty_sexp;

    #[test]
    fn pretty_printing_aligns_under_open_brackets() {
        let sexp = "(nsubj (NOUN A)(obj-H (VERB-H B)(NOUN C)))";
        let expected = "(nsubj (NOUN A)
       (obj-H (VERB-H B)
              (NOUN C)))";
        assert_eq!(pretty_sexp(sexp), expected);
    }

    #[test]
    fn single_leaf_is_untouched() {
        assert_eq!(pretty_sexp("(INTJ hi)"), "(INTJ hi)");
    }
}
