use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DOCUMENT_FORMAT: &str = "MANUAL";
pub const DOCUMENT_TYPE: &str = "LP_INTRODUCE_GOODS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductGroup {
    Clothes,
    Shoes,
    Tobacco,
    Perfumery,
    Tires,
    Electronics,
    Pharma,
    Milk,
    Bicycle,
    Wheelchairs,
}

impl ProductGroup {
    pub const ALL: [ProductGroup; 10] = [
        ProductGroup::Clothes,
        ProductGroup::Shoes,
        ProductGroup::Tobacco,
        ProductGroup::Perfumery,
        ProductGroup::Tires,
        ProductGroup::Electronics,
        ProductGroup::Pharma,
        ProductGroup::Milk,
        ProductGroup::Bicycle,
        ProductGroup::Wheelchairs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductGroup::Clothes => "clothes",
            ProductGroup::Shoes => "shoes",
            ProductGroup::Tobacco => "tobacco",
            ProductGroup::Perfumery => "perfumery",
            ProductGroup::Tires => "tires",
            ProductGroup::Electronics => "electronics",
            ProductGroup::Pharma => "pharma",
            ProductGroup::Milk => "milk",
            ProductGroup::Bicycle => "bicycle",
            ProductGroup::Wheelchairs => "wheelchairs",
        }
    }
}

impl fmt::Display for ProductGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductGroup::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| format!("unknown product group: {}", s))
    }
}

/// A single product line of a goods introduction document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_document_number: Option<String>,
    pub owner_inn: String,
    pub producer_inn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_date: Option<String>,
    pub tnved_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uit_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uitu_code: Option<String>,
}

impl Product {
    /// The API does not say how to tell a UIT from a UITU code, so the single
    /// value fills both. Use [`Product::with_uit_code`] and
    /// [`Product::with_uitu_code`] when the distinction matters.
    pub fn new(
        owner_inn: impl Into<String>,
        producer_inn: impl Into<String>,
        tnved_code: impl Into<String>,
        uit_or_uitu_code: impl Into<String>,
    ) -> Self {
        let code = uit_or_uitu_code.into();
        Self {
            certificate_document: None,
            certificate_document_date: None,
            certificate_document_number: None,
            owner_inn: owner_inn.into(),
            producer_inn: producer_inn.into(),
            production_date: None,
            tnved_code: tnved_code.into(),
            uit_code: Some(code.clone()),
            uitu_code: Some(code),
        }
    }

    pub fn with_uit_code(mut self, code: Option<String>) -> Self {
        self.uit_code = code;
        self
    }

    pub fn with_uitu_code(mut self, code: Option<String>) -> Self {
        self.uitu_code = code;
        self
    }

    pub fn with_certificate(
        mut self,
        document: impl Into<String>,
        date: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        self.certificate_document = Some(document.into());
        self.certificate_document_date = Some(date.into());
        self.certificate_document_number = Some(number.into());
        self
    }

    pub fn with_production_date(mut self, date: impl Into<String>) -> Self {
        self.production_date = Some(date.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub doc_id: String,
    pub doc_status: String,
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_request: Option<String>,
    pub owner_inn: String,
    pub participant_inn: String,
    pub producer_inn: String,
    pub production_date: String,
    pub production_type: String,
    pub reg_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reg_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<Product>,
}

impl Document {
    /// Builds a document from its required fields. Optional fields are set
    /// with the `with_*` methods.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        doc_id: impl Into<String>,
        doc_status: impl Into<String>,
        doc_type: impl Into<String>,
        owner_inn: impl Into<String>,
        participant_inn: impl Into<String>,
        producer_inn: impl Into<String>,
        production_date: impl Into<String>,
        production_type: impl Into<String>,
        reg_date: impl Into<String>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            doc_status: doc_status.into(),
            doc_type: doc_type.into(),
            import_request: None,
            owner_inn: owner_inn.into(),
            participant_inn: participant_inn.into(),
            producer_inn: producer_inn.into(),
            production_date: production_date.into(),
            production_type: production_type.into(),
            reg_date: reg_date.into(),
            reg_number: None,
            description: None,
            products: Vec::new(),
        }
    }

    pub fn with_import_request(mut self, import_request: impl Into<String>) -> Self {
        self.import_request = Some(import_request.into());
        self
    }

    pub fn with_reg_number(mut self, reg_number: impl Into<String>) -> Self {
        self.reg_number = Some(reg_number.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn add_product(&mut self, product: Product) {
        self.products.push(product);
    }
}

/// Request body of the document creation endpoint.
#[derive(Serialize)]
pub struct CreateDocumentRequest<'a> {
    pub product_document: &'a Document,
    pub product_group: ProductGroup,
    pub document_format: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl<'a> CreateDocumentRequest<'a> {
    pub fn new(document: &'a Document, product_group: ProductGroup) -> Self {
        Self {
            product_document: document,
            product_group,
            document_format: DOCUMENT_FORMAT,
            kind: DOCUMENT_TYPE,
        }
    }
}

/// One entry of a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchEntry {
    pub product_group: ProductGroup,
    pub document: Document,
}
