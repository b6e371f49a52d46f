use super::ConfigMap;

/// A node of the step content tree. Containers own their children.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Primitive {
    Box(BoxPrimitive),
    Stack(StackPrimitive),
    Text(TextPrimitive),
    Button(ButtonPrimitive),
    Image(ImagePrimitive),
    Embed(EmbedPrimitive),
    Spacer(SpacerPrimitive),
    OptionSelect(OptionSelectPrimitive),
    TextInput(TextInputPrimitive),
    CustomComponent(CustomComponentPrimitive),
    Block(BlockPrimitive),
}

impl Primitive {
    #[allow(missing_docs)]
    pub fn id(&self) -> &str {
        match self {
            Primitive::Box(it) => &it.id,
            Primitive::Stack(it) => &it.id,
            Primitive::Text(it) => &it.id,
            Primitive::Button(it) => &it.id,
            Primitive::Image(it) => &it.id,
            Primitive::Embed(it) => &it.id,
            Primitive::Spacer(it) => &it.id,
            Primitive::OptionSelect(it) => &it.id,
            Primitive::TextInput(it) => &it.id,
            Primitive::CustomComponent(it) => &it.id,
            Primitive::Block(it) => &it.id,
        }
    }

    #[allow(missing_docs)]
    pub fn style(&self) -> &ComponentStyle {
        match self {
            Primitive::Box(it) => &it.style,
            Primitive::Stack(it) => &it.style,
            Primitive::Text(it) => &it.style,
            Primitive::Button(it) => &it.style,
            Primitive::Image(it) => &it.style,
            Primitive::Embed(it) => &it.style,
            Primitive::Spacer(it) => &it.style,
            Primitive::OptionSelect(it) => &it.style,
            Primitive::TextInput(it) => &it.style,
            Primitive::CustomComponent(it) => &it.style,
            Primitive::Block(it) => &it.style,
        }
    }

    /// Direct children in document order.
    pub fn children(&self) -> Vec<&Primitive> {
        match self {
            Primitive::Box(it) => it.items.iter().collect(),
            Primitive::Stack(it) => it.items.iter().collect(),
            Primitive::Button(it) => vec![&*it.content],
            Primitive::Block(it) => vec![&*it.content],
            Primitive::OptionSelect(it) => it
                .options
                .iter()
                .flat_map(|option| std::iter::once(&option.content).chain(&option.selected_content))
                .collect(),
            Primitive::Text(_)
            | Primitive::Image(_)
            | Primitive::Embed(_)
            | Primitive::Spacer(_)
            | Primitive::TextInput(_)
            | Primitive::CustomComponent(_) => Vec::new(),
        }
    }

    /// Depth-first search for the primitive with the given id.
    pub fn find(&self, id: &str) -> Option<&Primitive> {
        if self.id() == id {
            return Some(self);
        }
        self.children().into_iter().find_map(|child| child.find(id))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct BoxPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub items: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct StackPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub orientation: Orientation,
    pub distribution: Distribution,
    pub spacing: f64,
    pub items: Vec<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct TextPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub text: String,
    pub spans: Vec<TextSpan>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct TextSpan {
    pub text: String,
    pub style: ComponentStyle,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct ButtonPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub content: Box<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct ImagePrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub url: String,
    pub accessibility_label: Option<String>,
    pub intrinsic_size: Option<Size>,
    pub content_mode: ContentMode,
    pub blur_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct EmbedPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub embed: String,
    pub intrinsic_size: Option<Size>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct SpacerPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub spacing: f64,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct OptionSelectPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub label: TextPrimitive,
    pub error_label: Option<TextPrimitive>,
    pub select_mode: SelectMode,
    pub options: Vec<OptionItem>,
    pub default_value: Vec<String>,
    pub min_selections: u32,
    pub max_selections: Option<u32>,
    pub control_position: ControlPosition,
    pub display_format: DisplayFormat,
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct OptionItem {
    pub value: String,
    pub content: Primitive,
    pub selected_content: Option<Primitive>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct TextInputPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub label: TextPrimitive,
    pub error_label: Option<TextPrimitive>,
    pub placeholder: Option<TextPrimitive>,
    pub default_value: Option<String>,
    pub required: bool,
    pub number_of_lines: u32,
    pub max_length: Option<u32>,
    pub data_type: TextInputDataType,
    pub attribute_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct CustomComponentPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub identifier: String,
    pub config: ConfigMap,
}

/// A reusable block of content. Renders its content as-is.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct BlockPrimitive {
    pub id: String,
    pub style: ComponentStyle,
    pub block_type: String,
    pub content: Box<Primitive>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Orientation {
    Horizontal,
    #[default]
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Distribution {
    #[default]
    Center,
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum ContentMode {
    #[default]
    Fit,
    Fill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum SelectMode {
    #[default]
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum ControlPosition {
    #[default]
    Leading,
    Trailing,
    Top,
    Bottom,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum DisplayFormat {
    #[default]
    VerticalList,
    HorizontalList,
    Picker,
    Nps,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum TextInputDataType {
    #[default]
    Text,
    Number,
    Email,
    Phone,
    Name,
    Address,
    Url,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// A color with an optional dark mode variant. Colors are hex strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentColor {
    #[allow(missing_docs)]
    pub light: String,
    /// Dark mode color; equals `light` when not configured.
    pub dark: String,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub struct ComponentShadow {
    pub color: ComponentColor,
    pub radius: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub struct EdgeInsets {
    pub top: f64,
    pub leading: f64,
    pub bottom: f64,
    pub trailing: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum HorizontalAlignment {
    Leading,
    Center,
    Trailing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

/// Style attached to every primitive. All fields are optional; renderers apply their defaults.
#[derive(Debug, Clone, PartialEq, Default)]
#[allow(missing_docs)]
pub struct ComponentStyle {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub padding: EdgeInsets,
    pub margin: EdgeInsets,
    pub corner_radius: Option<f64>,
    pub shadow: Option<ComponentShadow>,
    pub foreground_color: Option<ComponentColor>,
    pub background_color: Option<ComponentColor>,
    pub border_color: Option<ComponentColor>,
    pub border_width: Option<f64>,
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub letter_spacing: Option<f64>,
    pub line_height: Option<f64>,
    pub text_alignment: Option<HorizontalAlignment>,
    pub horizontal_alignment: Option<HorizontalAlignment>,
    pub vertical_alignment: Option<VerticalAlignment>,
}
