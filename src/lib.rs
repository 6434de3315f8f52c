#![allow(clippy::module_inception)]

use std::{
    io::{BufRead, Write},
    rc::Rc,
};

use log::info;
use thiserror::Error;

use crate::{
    ast::ast::Program,
    errors::{
        diagnostics::Diagnostic,
        errors::{Error, ErrorTip},
        runtime::RuntimeError,
    },
    interpreter::interpreter::Interpreter,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::SemanticChecker,
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A point in a source file.
///
/// `offset` is a byte offset, `line` and `column` are 1-based.
#[derive(Debug, Clone)]
pub struct Position {
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(offset: u32, line: u32, column: u32, file: Rc<String>) -> Self {
        Position {
            offset,
            line,
            column,
            file,
        }
    }

    pub fn null() -> Self {
        Position::new(0, 0, 0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn line(&self) -> u32 {
        self.start.line
    }
}

/// Runs the static pass over a parsed program and returns every diagnostic found.
///
/// An empty result means the program may be handed to [`execute`].
pub fn check(program: &Program) -> Vec<Diagnostic> {
    SemanticChecker::new().check(program)
}

/// Executes an already checked program against the given input and output streams.
pub fn execute<R: BufRead, W: Write>(
    program: &Program,
    input: R,
    output: W,
) -> Result<(), RuntimeError> {
    Interpreter::new(input, output).run(program)
}

/// Any failure of the full source-to-output pipeline.
#[derive(Error, Debug)]
pub enum TomError {
    #[error("syntax error: {}", .0.get_error_name())]
    Syntax(Error),
    #[error("{} semantic error(s)", .0.len())]
    Semantic(Vec<Diagnostic>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Tokenizes, parses, checks and runs `source`.
pub fn run_source<R: BufRead, W: Write>(
    source: &str,
    file: &str,
    input: R,
    output: W,
) -> Result<(), TomError> {
    let program = parse_source(source, file)?;

    let diagnostics = check(&program);
    if !diagnostics.is_empty() {
        return Err(TomError::Semantic(diagnostics));
    }

    execute(&program, input, output)?;
    Ok(())
}

/// Tokenizes and parses `source` into a program tree.
pub fn parse_source(source: &str, file: &str) -> Result<Program, TomError> {
    let tokens = tokenize(source, Some(String::from(file))).map_err(TomError::Syntax)?;
    info!("tokenized {} tokens from {}", tokens.len(), file);

    let (_, program) = parse(tokens, Rc::new(String::from(file)));
    program.map_err(TomError::Syntax)
}

pub fn get_line_at_position(source: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // Position sits at the very end of the source (EOF)
    source
        .split_inclusive('\n')
        .last()
        .map(|line| (line_number - 1, line.to_string(), line.len()))
}


/// Renders a syntax error pointing at its source line.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        Error: message
        -> main.tl
           |
        20 | int a = #;
           | --------^
    */

    let position = error.get_position();
    let mut rendered = String::new();

    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("-> {}:{}:{}\n", position.file, position.line, position.column));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, position.offset) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .count();

    (String::from(&string[start..]), start)
}
