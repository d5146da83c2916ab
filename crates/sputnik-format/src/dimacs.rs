//! DIMACS CNF format parser.
//!
//! Standard format used in SAT competitions. Comment lines start with `c`,
//! a header `p cnf <nvars> <nclauses>` precedes the clauses, and each clause
//! is a list of nonzero signed integers terminated by `0` (clauses may span
//! lines).

use sputnik_base::{Error, Result};
use std::io::{BufRead, BufReader, Read};

/// A DIMACS CNF formula.
#[derive(Debug, Clone)]
pub struct DimacsCnf {
    /// Number of variables declared in the header.
    pub num_vars: usize,
    /// Clauses as vectors of signed literals. Empty clauses are kept: a
    /// formula containing one is trivially unsatisfiable.
    pub clauses: Vec<Vec<i64>>,
}

impl DimacsCnf {
    /// Parses DIMACS CNF from a reader.
    ///
    /// Rejects input without a header, literal tokens that are not integers,
    /// variables outside the declared range, and a clause left open at end of
    /// input. A clause count that disagrees with the header is tolerated.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut num_vars = 0usize;
        let mut clauses = Vec::new();
        let mut clause = Vec::new();
        let mut header_found = false;

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let lineno = lineno + 1;

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('c') {
                continue;
            }

            // Parse header
            if line.starts_with('p') {
                if header_found {
                    return Err(Error::BadHeader(format!(
                        "duplicate header on line {lineno}"
                    )));
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
                    return Err(Error::BadHeader(format!("{line:?} on line {lineno}")));
                }
                num_vars = parts[2].parse().map_err(|_| {
                    Error::BadHeader(format!("bad variable count {:?} on line {lineno}", parts[2]))
                })?;
                let num_clauses: usize = parts[3].parse().map_err(|_| {
                    Error::BadHeader(format!("bad clause count {:?} on line {lineno}", parts[3]))
                })?;
                clauses.reserve(num_clauses);
                header_found = true;
                continue;
            }

            if !header_found {
                return Err(Error::BadHeader(format!(
                    "clause data before header on line {lineno}"
                )));
            }

            for token in line.split_whitespace() {
                let lit: i64 = token.parse().map_err(|_| Error::BadToken {
                    token: token.to_string(),
                    line: lineno,
                })?;
                if lit == 0 {
                    clauses.push(std::mem::take(&mut clause));
                } else {
                    if lit.unsigned_abs() > num_vars as u64 {
                        return Err(Error::VariableOutOfRange {
                            var: lit,
                            num_vars,
                        });
                    }
                    clause.push(lit);
                }
            }
        }

        if !header_found {
            return Err(Error::BadHeader("no 'p cnf' line in input".to_string()));
        }
        if !clause.is_empty() {
            return Err(Error::UnterminatedClause);
        }

        Ok(Self { num_vars, clauses })
    }

    /// Parses DIMACS CNF from a string.
    pub fn from_str(s: &str) -> Result<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Renders the formula back to DIMACS text.
    #[must_use]
    pub fn to_dimacs(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("p cnf {} {}\n", self.num_vars, self.clauses.len()));
        for clause in &self.clauses {
            for lit in clause {
                out.push_str(&format!("{lit} "));
            }
            out.push_str("0\n");
        }
        out
    }
}
