//! XML functions.

use super::{Expr, Identifier, NodeList, TargetElement, TypeName};

/// `DOCUMENT` or `CONTENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlOption {
    Document,
    Content,
}

impl XmlOption {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Content => "content",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlStandalone {
    Yes,
    No,
    NoValue,
}

impl XmlStandalone {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::NoValue => "no value",
        }
    }
}

/// `XMLELEMENT(NAME name [, XMLATTRIBUTES(...)] [, content, ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: Identifier,
    pub attributes: NodeList<TargetElement>,
    pub content: NodeList<Expr>,
}

/// `XMLEXISTS(xpath PASSING xml)`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlExists {
    pub xpath: Expr,
    pub xml: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlParse {
    pub option: XmlOption,
    pub argument: Expr,
    pub preserve_whitespace: bool,
}

/// `XMLPI(NAME name [, content])`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlPi {
    pub name: Identifier,
    pub content: Option<Expr>,
}

/// `XMLROOT(xml, VERSION version|NO VALUE [, STANDALONE ...])`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlRoot {
    pub xml: Expr,
    pub version: Option<Expr>,
    pub standalone: Option<XmlStandalone>,
}

/// `XMLSERIALIZE(DOCUMENT|CONTENT value AS type [[NO] INDENT])`.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlSerialize {
    pub option: XmlOption,
    pub argument: Expr,
    pub type_name: TypeName,
    pub indent: Option<bool>,
}

/// An XML function call.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlExpr {
    Element(XmlElement),
    Exists(XmlExists),
    Forest(NodeList<TargetElement>),
    Parse(XmlParse),
    Pi(XmlPi),
    Root(XmlRoot),
    Serialize(XmlSerialize),
}
