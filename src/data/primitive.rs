//! Wire format of primitives and their style. Primitives are tagged by `type`.
use serde::{Deserialize, Serialize};

use crate::experience::ConfigMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum PrimitiveResponse {
    Box(BoxPrimitiveResponse),
    Stack(StackPrimitiveResponse),
    Text(TextPrimitiveResponse),
    Button(ButtonPrimitiveResponse),
    Image(ImagePrimitiveResponse),
    Embed(EmbedPrimitiveResponse),
    Spacer(SpacerPrimitiveResponse),
    OptionSelect(OptionSelectPrimitiveResponse),
    TextInput(TextInputPrimitiveResponse),
    CustomComponent(CustomComponentPrimitiveResponse),
    Block(BlockPrimitiveResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BoxPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    #[serde(default)]
    pub items: Vec<PrimitiveResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct StackPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    /// `"horizontal"` or `"vertical"`.
    pub orientation: String,
    /// `"center"` or `"equal"`.
    #[serde(default)]
    pub distribution: Option<String>,
    #[serde(default)]
    pub spacing: Option<f64>,
    #[serde(default)]
    pub items: Vec<PrimitiveResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TextPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub spans: Vec<TextSpanResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TextSpanResponse {
    pub text: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ButtonPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub content: Box<PrimitiveResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ImagePrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub image_url: String,
    #[serde(default)]
    pub accessibility_label: Option<String>,
    #[serde(default)]
    pub intrinsic_size: Option<SizeResponse>,
    /// `"fit"` or `"fill"`.
    #[serde(default)]
    pub content_mode: Option<String>,
    #[serde(default)]
    pub blur_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct EmbedPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub embed: String,
    #[serde(default)]
    pub intrinsic_size: Option<SizeResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SpacerPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    #[serde(default)]
    pub spacing: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct OptionSelectPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub label: TextPrimitiveResponse,
    #[serde(default)]
    pub error_label: Option<TextPrimitiveResponse>,
    /// `"single"` or `"multi"`.
    #[serde(default)]
    pub select_mode: Option<String>,
    pub options: Vec<OptionItemResponse>,
    #[serde(default)]
    pub default_value: Vec<String>,
    #[serde(default)]
    pub min_selections: Option<u32>,
    #[serde(default)]
    pub max_selections: Option<u32>,
    #[serde(default)]
    pub control_position: Option<String>,
    #[serde(default)]
    pub display_format: Option<String>,
    #[serde(default)]
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct OptionItemResponse {
    pub value: String,
    pub content: PrimitiveResponse,
    #[serde(default)]
    pub selected_content: Option<PrimitiveResponse>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct TextInputPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub label: TextPrimitiveResponse,
    #[serde(default)]
    pub error_label: Option<TextPrimitiveResponse>,
    #[serde(default)]
    pub placeholder: Option<TextPrimitiveResponse>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub number_of_lines: Option<u32>,
    #[serde(default)]
    pub max_length: Option<u32>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CustomComponentPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub identifier: String,
    #[serde(default)]
    pub config: Option<ConfigMap>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct BlockPrimitiveResponse {
    pub id: String,
    #[serde(default)]
    pub style: Option<StyleResponse>,
    pub block_type: String,
    pub content: Box<PrimitiveResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SizeResponse {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ColorResponse {
    pub light: String,
    #[serde(default)]
    pub dark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ShadowResponse {
    pub color: ColorResponse,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct StyleResponse {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding_top: Option<f64>,
    pub padding_leading: Option<f64>,
    pub padding_bottom: Option<f64>,
    pub padding_trailing: Option<f64>,
    pub margin_top: Option<f64>,
    pub margin_leading: Option<f64>,
    pub margin_bottom: Option<f64>,
    pub margin_trailing: Option<f64>,
    pub corner_radius: Option<f64>,
    pub shadow: Option<ShadowResponse>,
    pub foreground_color: Option<ColorResponse>,
    pub background_color: Option<ColorResponse>,
    pub border_color: Option<ColorResponse>,
    pub border_width: Option<f64>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub line_height: Option<f64>,
    pub text_alignment: Option<String>,
    pub horizontal_alignment: Option<String>,
    pub vertical_alignment: Option<String>,
}
