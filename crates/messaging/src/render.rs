use herald_core::{MessageType, TemplateBlock};
use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RenderError;

/// Name under which the HTML layout is registered.
const LAYOUT_NAME: &str = "notification.html";

const LAYOUT: &str = include_str!("../templates/notification.html");

/// Maximum size of a rendered body (1 MB).
const MAX_RENDERED_BYTES: usize = 1_024 * 1_024;

/// Fuel limit for `MiniJinja` template evaluation (denial-of-service protection).
const FUEL_LIMIT: u64 = 100_000;

/// A [`TemplateBlock`] after its fields have been rendered.
#[derive(Debug, Serialize)]
struct RenderedBlock {
    title: Option<String>,
    title_link: Option<String>,
    text: Option<String>,
    button_text: Option<String>,
    button_value: Option<String>,
}

#[derive(Debug, Serialize)]
struct Section {
    blocks: Vec<RenderedBlock>,
}

/// Render a notification template into a single-section HTML body.
///
/// Each block field is rendered as a `MiniJinja` string template with `vars`
/// in scope. Values are HTML-escaped when placed into the layout.
///
/// # Examples
///
/// ```
/// use herald_core::{MessageType, TemplateBlock};
/// use herald_messaging::create_message_body;
///
/// let mut vars = serde_json::Map::new();
/// vars.insert("name".into(), "inc-42".into());
/// let blocks = vec![TemplateBlock::new("Incident", "{{ name }} is active")];
///
/// let html = create_message_body(&blocks, MessageType::IncidentNotification, &vars).unwrap();
/// assert!(html.contains("inc-42 is active"));
/// ```
pub fn create_message_body(
    template: &[TemplateBlock],
    message_type: MessageType,
    vars: &Map<String, Value>,
) -> Result<String, RenderError> {
    let env = environment()?;
    let section = render_section(&env, template, vars)?;
    render_layout(&env, message_type, &[section])
}

/// Render a notification template once per item into a multi-section HTML
/// body.
///
/// For each item, object fields are layered over `vars`; the item itself is
/// also available as `item`, which is how non-object items are reached.
pub fn create_multi_message_body(
    template: &[TemplateBlock],
    message_type: MessageType,
    items: &[Value],
    vars: &Map<String, Value>,
) -> Result<String, RenderError> {
    let env = environment()?;
    let sections = items
        .iter()
        .map(|item| render_section(&env, template, &item_vars(vars, item)))
        .collect::<Result<Vec<_>, _>>()?;
    render_layout(&env, message_type, &sections)
}

fn environment() -> Result<Environment<'static>, RenderError> {
    let mut env = Environment::new();
    env.set_fuel(Some(FUEL_LIMIT));
    env.add_template(LAYOUT_NAME, LAYOUT)
        .map_err(|source| RenderError::Syntax {
            name: LAYOUT_NAME.to_owned(),
            source,
        })?;
    Ok(env)
}

fn item_vars(vars: &Map<String, Value>, item: &Value) -> Map<String, Value> {
    let mut merged = vars.clone();
    if let Value::Object(fields) = item {
        merged.extend(fields.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged.insert("item".to_owned(), item.clone());
    merged
}

fn render_section(
    env: &Environment<'_>,
    template: &[TemplateBlock],
    vars: &Map<String, Value>,
) -> Result<Section, RenderError> {
    let ctx = minijinja::Value::from_serialize(vars);
    let blocks = template
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let field = |name: &str, src: Option<&str>| render_field(env, &ctx, index, name, src);
            Ok(RenderedBlock {
                title: field("title", block.title.as_deref())?,
                title_link: field("title_link", block.title_link.as_deref())?,
                text: field("text", block.text.as_deref())?,
                button_text: field("button_text", block.button_text.as_deref())?,
                button_value: field("button_value", block.button_value.as_deref())?,
            })
        })
        .collect::<Result<Vec<_>, RenderError>>()?;
    Ok(Section { blocks })
}

fn render_field(
    env: &Environment<'_>,
    ctx: &minijinja::Value,
    index: usize,
    name: &str,
    src: Option<&str>,
) -> Result<Option<String>, RenderError> {
    let Some(src) = src else {
        return Ok(None);
    };
    env.render_str(src, ctx)
        .map(Some)
        .map_err(|source| RenderError::Render {
            field: format!("block {index} field '{name}'"),
            source,
        })
}

fn render_layout(
    env: &Environment<'_>,
    message_type: MessageType,
    sections: &[Section],
) -> Result<String, RenderError> {
    let layout = env
        .get_template(LAYOUT_NAME)
        .map_err(|source| RenderError::Render {
            field: LAYOUT_NAME.to_owned(),
            source,
        })?;

    let body = layout
        .render(context! {
            heading => message_type.heading(),
            message_type => message_type.as_str(),
            sections => sections,
        })
        .map_err(|source| RenderError::Render {
            field: LAYOUT_NAME.to_owned(),
            source,
        })?;

    if body.len() > MAX_RENDERED_BYTES {
        return Err(RenderError::TooLarge {
            size: body.len(),
            limit: MAX_RENDERED_BYTES,
        });
    }

    debug!(
        message_type = %message_type,
        sections = sections.len(),
        bytes = body.len(),
        "rendered message body"
    );
    Ok(body)
}
