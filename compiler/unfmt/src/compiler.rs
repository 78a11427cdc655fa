//! Template compiler: field descriptors to one regex pattern.
//!
//! Every field becomes a capture group wrapping its type's fragment. The
//! compiler numbers capture groups itself: each field takes one group for
//! its value followed by however many groups its fragment contains, and
//! the evaluator reads them back by those numbers.
//!
//! Padding is matched outside the value group:
//!
//! | alignment | shape                  |
//! |-----------|------------------------|
//! | `<`       | `(value)fill*`         |
//! | `>`       | `fill*(value)`         |
//! | `^`       | `fill*(value)fill*`    |
//! | `=`       | `([-+ ]?fill*value)`   |

use rustc_hash::FxHashMap;
use unfmt_ir::{tokenize, Align, FieldDescriptor, FieldId, Segment};
use unfmt_types::{lookup, ExtraTypes, Fragment, ResolvedType};

use crate::{CompileError, CompileOptions};

/// How one field is matched and converted.
#[derive(Clone, Debug)]
pub(crate) struct FieldPlan {
    pub(crate) id: FieldId,
    pub(crate) ty: ResolvedType,
    /// Capture group holding the value.
    pub(crate) slot: usize,
    /// Groups inside the value group, numbered right after `slot`.
    pub(crate) internal: usize,
    /// Side(s) padding may appear on.
    pub(crate) padding: Option<Align>,
    pub(crate) fill: char,
    /// Fill allowed between a sign and the digits (`=` alignment).
    pub(crate) sign_fill: Option<char>,
}

/// The output of compilation, before the engine sees it.
#[derive(Debug)]
pub(crate) struct Program {
    pub(crate) expression: String,
    pub(crate) fields: Vec<FieldPlan>,
    /// Names in order of first appearance.
    pub(crate) named: Vec<String>,
    pub(crate) fixed_count: usize,
    /// Capture groups the expression uses.
    pub(crate) groups: usize,
}

/// Compile a template into a pattern and its field plans.
#[tracing::instrument(level = "debug", skip_all, fields(template = template))]
pub(crate) fn generate(
    template: &str,
    extra: &ExtraTypes,
    options: &CompileOptions,
) -> Result<Program, CompileError> {
    let segments = tokenize(template)?;

    let mut expression = String::new();
    let mut fields = Vec::new();
    let mut named = Vec::new();
    let mut named_types: FxHashMap<String, (String, Option<&'static str>)> = FxHashMap::default();
    let mut fixed_count = 0;
    let mut groups = 0;

    for segment in segments {
        let field = match segment {
            Segment::Literal(text) => {
                expression.push_str(&regex::escape(&text));
                continue;
            }
            Segment::Field(field) => field,
        };

        let ty = lookup(field.type_code(), extra).map_err(|err| CompileError::UnknownType {
            code: err.0,
            offset: field.offset,
        })?;

        match &field.id {
            FieldId::Fixed(_) => fixed_count += 1,
            FieldId::Named(name) => {
                let kind = ty.value_kind();
                if let Some((first, first_kind)) = named_types.get(name) {
                    if !same_value_type(first, *first_kind, ty.code(), kind) {
                        return Err(CompileError::RepeatedName {
                            name: name.clone(),
                            first: first.clone(),
                            second: ty.code().to_string(),
                        });
                    }
                } else {
                    named_types.insert(name.clone(), (ty.code().to_string(), kind));
                    named.push(name.clone());
                }
            }
        }

        let fragment = ty.fragment();
        let slot = groups + 1;
        groups += 1 + fragment.groups;
        if let Some(limit) = options.max_groups {
            if groups > limit {
                return Err(CompileError::TooManyFields { groups, limit });
            }
        }

        let plan = plan_field(field, ty, slot, &fragment);
        expression.push_str(&field_pattern(&plan, &fragment));
        fields.push(plan);
    }

    tracing::debug!(%expression, groups, fields = fields.len(), "compiled template");

    Ok(Program {
        expression,
        fields,
        named,
        fixed_count,
        groups,
    })
}

/// Occurrences of one name agree when they share a code or both produce
/// the same kind of built-in value (`d` and `n` are both integers). A
/// custom type only agrees with itself.
fn same_value_type(
    first: &str,
    first_kind: Option<&str>,
    second: &str,
    second_kind: Option<&str>,
) -> bool {
    first == second || (first_kind.is_some() && first_kind == second_kind)
}

fn plan_field(
    field: FieldDescriptor,
    ty: ResolvedType,
    slot: usize,
    fragment: &Fragment,
) -> FieldPlan {
    let fill = field.spec.fill_char();
    // The zero flag is `=` alignment with `0` as fill.
    let sign_fill = match (ty.is_numeric(), field.spec.align) {
        (false, _) => None,
        (true, Some(Align::ZeroPad)) => Some(fill),
        (true, _) => field.spec.zero_pad.then_some('0'),
    };
    FieldPlan {
        id: field.id,
        padding: field.spec.padding(),
        fill,
        sign_fill,
        slot,
        internal: fragment.groups,
        ty,
    }
}

/// The pattern text for one field, including its padding.
fn field_pattern(plan: &FieldPlan, fragment: &Fragment) -> String {
    let mut value = String::new();
    if plan.ty.is_numeric() {
        value.push_str("[-+ ]?");
        if let Some(fill) = plan.sign_fill {
            value.push_str(&escape_char(fill));
            value.push('*');
        }
    }
    value.push_str("(?:");
    value.push_str(&fragment.pattern);
    value.push(')');

    let pad = format!("{}*", escape_char(plan.fill));
    match plan.padding {
        Some(Align::Left) => format!("({value}){pad}"),
        Some(Align::Right) => format!("{pad}({value})"),
        Some(Align::Center) => format!("{pad}({value}){pad}"),
        Some(Align::ZeroPad) | None => format!("({value})"),
    }
}

fn escape_char(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}
