#![deny(missing_docs)]

//! # Renderer
//!
//! Pure assembly of the per-operation artifact: an importable SQLAlchemy
//! model module containing a documentation header with the live example (when
//! one was obtained), the generated class identity, the table name binding,
//! the column block, and the `_fields` extraction-rule block. The emitted
//! text matches the hand-maintained modules it replaces, so generated files
//! drop into the consuming tree unchanged.

use crate::columns::ColumnSpec;
use crate::extractors::FieldRule;

/// Fixed import preamble of every generated module.
const MODULE_PREAMBLE: &str = r#"
# coding=utf-8
import os.path

from sqlalchemy import DateTime
from sqlalchemy import String
from sqlalchemy import Column
from sqlalchemy import Numeric
from sqlalchemy import Unicode
from sqlalchemy import UnicodeText
from sqlalchemy import Boolean
from sqlalchemy import SmallInteger
from sqlalchemy import Integer
from sqlalchemy import BigInteger

from sqlalchemy.dialects.mysql import JSON

from toolz import get_in

from ... import Base
from ....enums import operation_types_enum
from ....field_handlers import amount_field
from ....field_handlers import amount_symbol_field
from ....field_handlers import comment_body_field
from ..base import BaseOperation
"#;

/// Re-indents text to `num_spaces`, discarding existing leading whitespace
/// on each line.
pub fn reindent(s: &str, num_spaces: usize) -> String {
    if s.is_empty() {
        return String::new();
    }
    let pad = " ".repeat(num_spaces);
    s.lines()
        .map(|line| format!("{}{}", pad, line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes each line with `num_spaces` spaces, preserving existing
/// indentation (used for pre-formatted example JSON).
pub fn addindent(s: &str, num_spaces: usize) -> String {
    if s.is_empty() {
        return String::new();
    }
    let pad = " ".repeat(num_spaces);
    s.lines()
        .map(|line| format!("{}{}", pad, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders the complete artifact for one operation class.
pub fn render_operation(
    op_name: &str,
    class_name: &str,
    table_name: &str,
    columns: &[ColumnSpec],
    rules: &[FieldRule],
    example: Option<&str>,
) -> String {
    let column_block = reindent(
        &columns.iter().map(ColumnSpec::render).collect::<Vec<_>>().join("\n"),
        4,
    );
    let field_block = reindent(
        &rules.iter().map(FieldRule::render).collect::<Vec<_>>().join("\n"),
        8,
    );
    let example_block = addindent(example.unwrap_or(""), 4);

    format!(
        r#"{preamble}
class {class_name}(Base, BaseOperation):
    """

    Steem Blockchain Example
    ======================
{example_block}

    """

    __tablename__ = '{table_name}'
    __operation_type__ = '{op_name}'

{column_block}
    operation_type = Column(
        operation_types_enum,
        nullable=False,
        index=True,
        default='{op_name}')

    _fields = dict(
{field_block}
    )
"#,
        preamble = MODULE_PREAMBLE,
        class_name = class_name,
        example_block = example_block,
        table_name = table_name,
        op_name = op_name,
        column_block = column_block,
        field_block = field_block,
    )
}
