use std::{cell::RefCell, io::Write, rc::Rc};

use crate::{
    ast::Pos,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Interpreter},
        value::{core::Value, function::NativeKind},
    },
    tabular::{import::CsvTable, sql},
};

/// The table name all generated SQL targets.
const TABLE_NAME: &str = "GENERATED_TABLE";

/// Sentinel string a missing CSV cell becomes inside a `string[][]` value.
const NULL_CELL: &str = "NULL";

impl Interpreter<'_> {
    /// Invokes a native function with already-evaluated arguments.
    ///
    /// Each native checks its own argument contract; violations and
    /// collaborator failures (file I/O, malformed CSV) surface as runtime
    /// errors tagged with the call site's position.
    ///
    /// # Errors
    /// Arity mismatches, contract violations, and wrapped I/O failures.
    pub(crate) fn call_native(&mut self,
                              kind: NativeKind,
                              args: &[Value],
                              pos: Pos)
                              -> EvalResult<Value> {
        if args.len() != kind.arity() {
            return Err(RuntimeError::ArityMismatch { name:     kind.name().to_string(),
                                                     expected: kind.arity(),
                                                     found:    args.len(),
                                                     pos });
        }

        match kind {
            NativeKind::Print => {
                writeln!(self.out, "{}", args[0]).map_err(|e| write_error(&e, pos))?;
                Ok(Value::Void)
            },
            NativeKind::ImportCsv => {
                let path = string_arg(kind, &args[0], pos)?;
                self.import_csv(&path, pos)
            },
            NativeKind::CsvToArray => {
                let path = string_arg(kind, &args[0], pos)?;
                csv_to_array(&path, pos)
            },
            NativeKind::RowLength => {
                let rows = grid_arg(kind, &args[0], pos)?;
                let len = rows.borrow().len();
                Ok(Value::Int(len as i32))
            },
            NativeKind::ColLength => {
                let rows = grid_arg(kind, &args[0], pos)?;
                col_length(&rows, pos)
            },
            NativeKind::GenerateTable => {
                let rows = grid_arg(kind, &args[0], pos)?;
                let Value::Int(pk_index) = args[1] else {
                    return Err(RuntimeError::NativeContract { name:    kind.name()
                                                                            .to_string(),
                                                              details: format!("expected an int primary-key column index, found {}",
                                                                               args[1].type_name()),
                                                              pos });
                };
                self.generate_table(&rows, pk_index, pos)
            },
        }
    }

    /// Reads a CSV file and echoes it as a banner-framed text table.
    fn import_csv(&mut self, path: &str, pos: Pos) -> EvalResult<Value> {
        let table = CsvTable::read(path).map_err(|e| read_error(&e, pos))?;

        let out = &mut self.out;
        let mut echo = || -> std::io::Result<()> {
            writeln!(out, "--- CSV Data from: {path} ---")?;
            if table.rows.is_empty() {
                writeln!(out, "-- Empty CSV file --")?;
            } else {
                writeln!(out, "{}", table.headers.join("\t|\t"))?;
                writeln!(out, "------------------------------------")?;
                for row in &table.rows {
                    let cells: Vec<&str> = row.iter()
                                              .map(|cell| cell.as_deref().unwrap_or(NULL_CELL))
                                              .collect();
                    writeln!(out, "{}", cells.join("\t|\t"))?;
                }
            }
            writeln!(out, "------------------------------------")
        };
        echo().map_err(|e| write_error(&e, pos))?;
        Ok(Value::Void)
    }

    /// Emits `CREATE TABLE` and `INSERT` statements for a grid whose row 0
    /// holds the column names. Cells equal to the `NULL` sentinel become
    /// SQL `NULL`s.
    fn generate_table(&mut self,
                      rows: &Rc<RefCell<Vec<Value>>>,
                      pk_index: i32,
                      pos: Pos)
                      -> EvalResult<Value> {
        let elements = rows.borrow();
        if elements.is_empty() {
            writeln!(self.out, "-- Empty data for table generation --")
                .map_err(|e| write_error(&e, pos))?;
            return Ok(Value::Void);
        }

        let headers = row_strings(&elements[0], pos)?;
        let mut data = Vec::with_capacity(elements.len() - 1);
        for row in &elements[1..] {
            let cells = row_strings(row, pos)?;
            if cells.len() != headers.len() {
                return Err(RuntimeError::NativeContract { name:    NativeKind::GenerateTable.name()
                                                                                            .to_string(),
                                                          details: format!("every row must have {} column(s), found one with {}",
                                                                           headers.len(),
                                                                           cells.len()),
                                                          pos });
            }
            data.push(cells.into_iter()
                           .map(|cell| if cell == NULL_CELL { None } else { Some(cell) })
                           .collect::<Vec<_>>());
        }

        if pk_index < 0 || pk_index as usize >= headers.len() {
            return Err(RuntimeError::NativeContract { name:    NativeKind::GenerateTable.name()
                                                                                        .to_string(),
                                                      details: format!("primary-key column index {pk_index} is out of range for {} column(s)",
                                                                       headers.len()),
                                                      pos });
        }

        let ddl = sql::generate_create_table(&headers,
                                             &data,
                                             TABLE_NAME,
                                             &headers[pk_index as usize]);
        let statements = sql::generate_insert_statements(&headers, &data, TABLE_NAME);

        let out = &mut self.out;
        let mut emit = || -> std::io::Result<()> {
            writeln!(out, "--- Generated SQL ---")?;
            writeln!(out, "{ddl};\n")?;
            for statement in &statements {
                writeln!(out, "{statement}")?;
            }
            writeln!(out, "---------------------")
        };
        emit().map_err(|e| write_error(&e, pos))?;
        Ok(Value::Void)
    }
}

/// Loads a CSV file into a fresh 2-D string array.
///
/// Row 0 is the header row; each subsequent row is one record, with missing
/// cells filled by the `NULL` sentinel. This native is the only constructor
/// of array values in the language.
fn csv_to_array(path: &str, pos: Pos) -> EvalResult<Value> {
    let table = CsvTable::read(path).map_err(|e| read_error(&e, pos))?;

    let mut rows = Vec::with_capacity(table.rows.len() + 1);
    if !table.headers.is_empty() {
        rows.push(Value::array(table.headers.iter().cloned().map(Value::Str).collect(),
                               pos)?);
    }
    for row in table.rows {
        let cells = row.into_iter()
                       .map(|cell| Value::Str(cell.unwrap_or_else(|| NULL_CELL.to_string())))
                       .collect();
        rows.push(Value::array(cells, pos)?);
    }
    Value::array(rows, pos)
}

/// Column count of row 0; an empty grid has zero columns.
fn col_length(rows: &Rc<RefCell<Vec<Value>>>, pos: Pos) -> EvalResult<Value> {
    let rows = rows.borrow();
    let Some(first) = rows.first() else {
        return Ok(Value::Int(0));
    };
    let Value::Array(cells) = first else {
        return Err(RuntimeError::NativeContract { name:    NativeKind::ColLength.name()
                                                                                .to_string(),
                                                  details: "expected a two-dimensional array"
                                                           .to_string(),
                                                  pos });
    };
    let len = cells.borrow().len();
    Ok(Value::Int(len as i32))
}

/// Extracts one grid row as owned strings.
fn row_strings(row: &Value, pos: Pos) -> EvalResult<Vec<String>> {
    let Value::Array(cells) = row else {
        return Err(RuntimeError::DimensionMismatch { details: "expected a two-dimensional array"
                                                              .to_string(),
                                                     pos });
    };
    cells.borrow()
         .iter()
         .map(|cell| match cell {
             Value::Str(s) => Ok(s.clone()),
             other => Err(RuntimeError::TypeMismatch { details: format!("array cells hold strings, found {}",
                                                                        other.type_name()),
                                                       pos }),
         })
         .collect()
}

fn string_arg(kind: NativeKind, value: &Value, pos: Pos) -> EvalResult<String> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(RuntimeError::NativeContract { name:    kind.name().to_string(),
                                                    details: format!("expected a string argument, found {}",
                                                                     other.type_name()),
                                                    pos }),
    }
}

fn grid_arg(kind: NativeKind,
            value: &Value,
            pos: Pos)
            -> EvalResult<Rc<RefCell<Vec<Value>>>> {
    match value {
        Value::Array(rows) => Ok(Rc::clone(rows)),
        other => Err(RuntimeError::NativeContract { name:    kind.name().to_string(),
                                                    details: format!("expected a string[][] argument, found {}",
                                                                     other.type_name()),
                                                    pos }),
    }
}

fn write_error(error: &std::io::Error, pos: Pos) -> RuntimeError {
    RuntimeError::Io { details: error.to_string(),
                       pos }
}

fn read_error(error: &csv::Error, pos: Pos) -> RuntimeError {
    RuntimeError::Io { details: error.to_string(),
                       pos }
}
