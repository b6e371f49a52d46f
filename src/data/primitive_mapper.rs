//! Structural mapping of wire primitives into the rendering model.
//!
//! Unknown enum strings fall back to the model default rather than failing the experience.
use super::primitive::{
    ColorResponse, OptionItemResponse, PrimitiveResponse, ShadowResponse, SizeResponse,
    StyleResponse, TextPrimitiveResponse,
};
use crate::experience::{
    BlockPrimitive, BoxPrimitive, ButtonPrimitive, ComponentColor, ComponentShadow,
    ComponentStyle, ContentMode, ControlPosition, CustomComponentPrimitive, DisplayFormat,
    Distribution, EdgeInsets, EmbedPrimitive, HorizontalAlignment, ImagePrimitive, OptionItem,
    OptionSelectPrimitive, Orientation, Primitive, SelectMode, Size, SpacerPrimitive,
    StackPrimitive, TextInputDataType, TextInputPrimitive, TextPrimitive, TextSpan,
    VerticalAlignment,
};

/// Map a primitive tree.
pub fn map_primitive(response: &PrimitiveResponse) -> Primitive {
    match response {
        PrimitiveResponse::Box(it) => Primitive::Box(BoxPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            items: it.items.iter().map(map_primitive).collect(),
        }),
        PrimitiveResponse::Stack(it) => Primitive::Stack(StackPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            orientation: match it.orientation.as_str() {
                "horizontal" => Orientation::Horizontal,
                _ => Orientation::Vertical,
            },
            distribution: match it.distribution.as_deref() {
                Some("equal") => Distribution::Equal,
                _ => Distribution::Center,
            },
            spacing: it.spacing.unwrap_or(0.0),
            items: it.items.iter().map(map_primitive).collect(),
        }),
        PrimitiveResponse::Text(it) => Primitive::Text(map_text(it)),
        PrimitiveResponse::Button(it) => Primitive::Button(ButtonPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            content: Box::new(map_primitive(&it.content)),
        }),
        PrimitiveResponse::Image(it) => Primitive::Image(ImagePrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            url: it.image_url.clone(),
            accessibility_label: it.accessibility_label.clone(),
            intrinsic_size: it.intrinsic_size.map(map_size),
            content_mode: match it.content_mode.as_deref() {
                Some("fill") => ContentMode::Fill,
                _ => ContentMode::Fit,
            },
            blur_hash: it.blur_hash.clone(),
        }),
        PrimitiveResponse::Embed(it) => Primitive::Embed(EmbedPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            embed: it.embed.clone(),
            intrinsic_size: it.intrinsic_size.map(map_size),
        }),
        PrimitiveResponse::Spacer(it) => Primitive::Spacer(SpacerPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            spacing: it.spacing.unwrap_or(0.0),
        }),
        PrimitiveResponse::OptionSelect(it) => Primitive::OptionSelect(OptionSelectPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            label: map_text(&it.label),
            error_label: it.error_label.as_ref().map(map_text),
            select_mode: match it.select_mode.as_deref() {
                Some("multi") => SelectMode::Multi,
                _ => SelectMode::Single,
            },
            options: it.options.iter().map(map_option).collect(),
            default_value: it.default_value.clone(),
            min_selections: it.min_selections.unwrap_or(0),
            max_selections: it.max_selections,
            control_position: match it.control_position.as_deref() {
                Some("trailing") => ControlPosition::Trailing,
                Some("top") => ControlPosition::Top,
                Some("bottom") => ControlPosition::Bottom,
                Some("hidden") => ControlPosition::Hidden,
                _ => ControlPosition::Leading,
            },
            display_format: match it.display_format.as_deref() {
                Some("horizontalList") => DisplayFormat::HorizontalList,
                Some("picker") => DisplayFormat::Picker,
                Some("nps") => DisplayFormat::Nps,
                _ => DisplayFormat::VerticalList,
            },
            attribute_name: it.attribute_name.clone(),
        }),
        PrimitiveResponse::TextInput(it) => Primitive::TextInput(TextInputPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            label: map_text(&it.label),
            error_label: it.error_label.as_ref().map(map_text),
            placeholder: it.placeholder.as_ref().map(map_text),
            default_value: it.default_value.clone(),
            required: it.required,
            number_of_lines: it.number_of_lines.unwrap_or(1),
            max_length: it.max_length,
            data_type: match it.data_type.as_deref() {
                Some("number") => TextInputDataType::Number,
                Some("email") => TextInputDataType::Email,
                Some("phone") => TextInputDataType::Phone,
                Some("name") => TextInputDataType::Name,
                Some("address") => TextInputDataType::Address,
                Some("url") => TextInputDataType::Url,
                _ => TextInputDataType::Text,
            },
            attribute_name: it.attribute_name.clone(),
        }),
        PrimitiveResponse::CustomComponent(it) => {
            Primitive::CustomComponent(CustomComponentPrimitive {
                id: it.id.clone(),
                style: map_style(it.style.as_ref()),
                identifier: it.identifier.clone(),
                config: it.config.clone().unwrap_or_default(),
            })
        }
        PrimitiveResponse::Block(it) => Primitive::Block(BlockPrimitive {
            id: it.id.clone(),
            style: map_style(it.style.as_ref()),
            block_type: it.block_type.clone(),
            content: Box::new(map_primitive(&it.content)),
        }),
    }
}

fn map_text(response: &TextPrimitiveResponse) -> TextPrimitive {
    let spans: Vec<TextSpan> = response
        .spans
        .iter()
        .map(|span| TextSpan {
            text: span.text.clone(),
            style: map_style(span.style.as_ref()),
        })
        .collect();

    // Span-only text carries no plain `text`; keep the concatenation for accessibility.
    let text = match &response.text {
        Some(text) => text.clone(),
        None => spans.iter().map(|span| span.text.as_str()).collect(),
    };

    TextPrimitive {
        id: response.id.clone(),
        style: map_style(response.style.as_ref()),
        text,
        spans,
    }
}

fn map_option(response: &OptionItemResponse) -> OptionItem {
    OptionItem {
        value: response.value.clone(),
        content: map_primitive(&response.content),
        selected_content: response.selected_content.as_ref().map(map_primitive),
    }
}

fn map_size(size: SizeResponse) -> Size {
    Size {
        width: size.width,
        height: size.height,
    }
}

/// Map a wire style, or the default style when absent.
pub fn map_style(style: Option<&StyleResponse>) -> ComponentStyle {
    let Some(style) = style else {
        return ComponentStyle::default();
    };

    ComponentStyle {
        width: style.width,
        height: style.height,
        padding: EdgeInsets {
            top: style.padding_top.unwrap_or(0.0),
            leading: style.padding_leading.unwrap_or(0.0),
            bottom: style.padding_bottom.unwrap_or(0.0),
            trailing: style.padding_trailing.unwrap_or(0.0),
        },
        margin: EdgeInsets {
            top: style.margin_top.unwrap_or(0.0),
            leading: style.margin_leading.unwrap_or(0.0),
            bottom: style.margin_bottom.unwrap_or(0.0),
            trailing: style.margin_trailing.unwrap_or(0.0),
        },
        corner_radius: style.corner_radius,
        shadow: style.shadow.as_ref().map(map_shadow),
        foreground_color: style.foreground_color.as_ref().map(map_color),
        background_color: style.background_color.as_ref().map(map_color),
        border_color: style.border_color.as_ref().map(map_color),
        border_width: style.border_width,
        font_name: style.font_name.clone(),
        font_size: style.font_size,
        letter_spacing: style.letter_spacing,
        line_height: style.line_height,
        text_alignment: style
            .text_alignment
            .as_deref()
            .and_then(map_horizontal_alignment),
        horizontal_alignment: style
            .horizontal_alignment
            .as_deref()
            .and_then(map_horizontal_alignment),
        vertical_alignment: style
            .vertical_alignment
            .as_deref()
            .and_then(map_vertical_alignment),
    }
}

/// A color without a dark variant uses the light one in dark mode.
pub fn map_color(color: &ColorResponse) -> ComponentColor {
    ComponentColor {
        light: color.light.clone(),
        dark: color.dark.clone().unwrap_or_else(|| color.light.clone()),
    }
}

fn map_shadow(shadow: &ShadowResponse) -> ComponentShadow {
    ComponentShadow {
        color: map_color(&shadow.color),
        radius: shadow.radius,
        x: shadow.x,
        y: shadow.y,
    }
}

fn map_horizontal_alignment(value: &str) -> Option<HorizontalAlignment> {
    match value {
        "leading" => Some(HorizontalAlignment::Leading),
        "center" => Some(HorizontalAlignment::Center),
        "trailing" => Some(HorizontalAlignment::Trailing),
        _ => None,
    }
}

fn map_vertical_alignment(value: &str) -> Option<VerticalAlignment> {
    match value {
        "top" => Some(VerticalAlignment::Top),
        "center" => Some(VerticalAlignment::Center),
        "bottom" => Some(VerticalAlignment::Bottom),
        _ => None,
    }
}
