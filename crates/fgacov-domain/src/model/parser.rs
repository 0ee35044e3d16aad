//! DSL parser for OpenFGA authorization models.
//!
//! Parses the OpenFGA DSL format into [`AuthorizationModel`] structures.
//!
//! Example DSL:
//! ```text
//! type user
//!
//! type document
//!   relations
//!     define owner: [user]
//!     define editor: [user] or owner
//!     define viewer: [user] or editor
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1, space0, space1},
    combinator::{all_consuming, map, opt, recognize, value},
    error::{ErrorKind, ParseError as NomParseError, VerboseError},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};
use thiserror::Error;

use super::{AuthorizationModel, RelationDefinition, TypeDefinition, Userset};

/// Error returned when model text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
}

impl ParserError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;

type PResult<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Keywords that cannot be used as identifiers.
const RESERVED_KEYWORDS: &[&str] = &[
    "type",
    "relations",
    "define",
    "or",
    "and",
    "but",
    "not",
    "from",
    "this",
];

/// Parse a comment (`#` to end of line).
fn comment(input: &str) -> PResult<'_, ()> {
    value((), pair(char('#'), take_while(|c| c != '\n' && c != '\r')))(input)
}

/// Parse whitespace, including comments and newlines.
fn ws(input: &str) -> PResult<'_, ()> {
    value((), many0(alt((value((), multispace1), comment))))(input)
}

/// Parse an identifier (alphanumeric and underscore, not a reserved keyword).
fn identifier(input: &str) -> PResult<'_, &str> {
    let (rest, id) = take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    if RESERVED_KEYWORDS.contains(&id) {
        return Err(nom::Err::Error(VerboseError::from_error_kind(
            input,
            ErrorKind::Tag,
        )));
    }
    Ok((rest, id))
}

/// Parse a type constraint list like `[user]` or `[user, group#member]`.
fn type_constraints(input: &str) -> PResult<'_, Vec<String>> {
    delimited(
        char('['),
        separated_list1(
            tuple((space0, char(','), space0)),
            map(
                recognize(pair(identifier, opt(pair(char('#'), identifier)))),
                str::to_string,
            ),
        ),
        char(']'),
    )(input)
}

/// Parse the `this` keyword.
fn this_userset(input: &str) -> PResult<'_, Userset> {
    value(Userset::This, tag("this"))(input)
}

/// Parse `relation from tupleset` (tuple to userset).
fn tuple_to_userset(input: &str) -> PResult<'_, Userset> {
    map(
        tuple((identifier, space1, tag("from"), space1, identifier)),
        |(computed, _, _, _, tupleset)| Userset::TupleToUserset {
            tupleset: tupleset.to_string(),
            computed_userset: computed.to_string(),
        },
    )(input)
}

/// Parse a bare relation reference.
fn computed_userset(input: &str) -> PResult<'_, Userset> {
    map(identifier, |relation| Userset::ComputedUserset {
        relation: relation.to_string(),
    })(input)
}

fn base_userset(input: &str) -> PResult<'_, Userset> {
    alt((this_userset, tuple_to_userset, computed_userset))(input)
}

/// Exclusion binds tightest: `base but not subtract`.
fn exclusion_expr(input: &str) -> PResult<'_, Userset> {
    let (rest, base) = base_userset(input)?;
    let (rest, subtract) = opt(preceded(
        tuple((space1, tag("but"), space1, tag("not"), space1)),
        base_userset,
    ))(rest)?;
    match subtract {
        Some(subtract) => Ok((
            rest,
            Userset::Exclusion {
                base: Box::new(base),
                subtract: Box::new(subtract),
            },
        )),
        None => Ok((rest, base)),
    }
}

/// `and` binds tighter than `or`.
fn intersection_expr(input: &str) -> PResult<'_, Userset> {
    let (rest, first) = exclusion_expr(input)?;
    let (rest, more) = many0(preceded(
        tuple((space0, tag("and"), space1)),
        exclusion_expr,
    ))(rest)?;
    if more.is_empty() {
        return Ok((rest, first));
    }
    let mut children = vec![first];
    children.extend(more);
    Ok((rest, Userset::Intersection { children }))
}

/// Union has the lowest precedence.
fn union_expr(input: &str) -> PResult<'_, Userset> {
    let (rest, first) = intersection_expr(input)?;
    let (rest, more) = many0(preceded(
        tuple((space0, tag("or"), space1)),
        intersection_expr,
    ))(rest)?;
    if more.is_empty() {
        return Ok((rest, first));
    }
    let mut children = vec![first];
    children.extend(more);
    Ok((rest, Userset::Union { children }))
}

/// Parse `or`/`and` operands that continue a type-constraint-only definition,
/// e.g. the `or owner` in `define editor: [user] or owner`. The operator
/// decides the combinator: `or` yields a union, `and` an intersection.
fn operator_continuation(input: &str, base: Userset) -> PResult<'_, Userset> {
    let (rest, or_ops) = many0(preceded(
        tuple((space0, tag("or"), space1)),
        intersection_expr,
    ))(input)?;
    if !or_ops.is_empty() {
        let mut children = vec![base];
        children.extend(or_ops);
        return Ok((rest, Userset::Union { children }));
    }

    let (rest, and_ops) = many0(preceded(
        tuple((space0, tag("and"), space1)),
        exclusion_expr,
    ))(input)?;
    if !and_ops.is_empty() {
        let mut children = vec![base];
        children.extend(and_ops);
        return Ok((rest, Userset::Intersection { children }));
    }

    Ok((input, base))
}

/// Parse a relation definition like `define viewer: [user] or editor`.
fn relation_definition(input: &str) -> PResult<'_, RelationDefinition> {
    let (rest, _) = tuple((space0, tag("define"), space1))(input)?;
    let (rest, name) = identifier(rest)?;
    let (rest, _) = pair(char(':'), space0)(rest)?;
    let (rest, constraints) = opt(type_constraints)(rest)?;
    // An explicit userset after the constraint list replaces the implied
    // direct assignment, e.g. `define viewer: [user] viewer from parent`.
    let (rest, explicit) = opt(preceded(space0, union_expr))(rest)?;
    let base = explicit.unwrap_or(Userset::This);
    let (rest, rewrite) = operator_continuation(rest, base)?;

    Ok((
        rest,
        RelationDefinition {
            name: name.to_string(),
            type_constraints: constraints.unwrap_or_default(),
            rewrite,
        },
    ))
}

/// Parse a type definition with an optional relations block.
fn type_definition(input: &str) -> PResult<'_, TypeDefinition> {
    map(
        tuple((
            tag("type"),
            space1,
            identifier,
            ws,
            opt(preceded(
                pair(tag("relations"), ws),
                many0(terminated(relation_definition, ws)),
            )),
        )),
        |(_, _, type_name, _, relations)| TypeDefinition {
            type_name: type_name.to_string(),
            relations: relations.unwrap_or_default(),
        },
    )(input)
}

fn model(input: &str) -> PResult<'_, AuthorizationModel> {
    map(
        tuple((ws, many0(terminated(type_definition, ws)))),
        |(_, type_definitions)| AuthorizationModel {
            schema_version: "1.1".to_string(),
            type_definitions,
        },
    )(input)
}

/// Parse a DSL string into an [`AuthorizationModel`].
pub fn parse(input: &str) -> ParserResult<AuthorizationModel> {
    match all_consuming(model)(input) {
        Ok((_, model)) => Ok(model),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(ParserError::new(format!(
            "parse error: {}",
            nom::error::convert_error(input, e)
        ))),
        Err(nom::Err::Incomplete(_)) => Err(ParserError::new("incomplete input")),
    }
}
