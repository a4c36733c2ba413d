use genpdf::{elements, style, Alignment, Element};

use crate::entities::{adoption, animal, shelter_configuration};
use crate::error::ApiError;

/// Renders the adoption agreement for an approved (or pending) adoption.
/// Fonts are loaded from FONT_DIR; genpdf needs a regular/bold/italic family
/// on disk (Liberation Sans ships with most distributions).
pub fn adoption_agreement(
    font_dir: &str,
    config: &shelter_configuration::Model,
    adoption: &adoption::Model,
    animal: &animal::Model,
) -> Result<Vec<u8>, ApiError> {
    let font_family = genpdf::fonts::from_files(font_dir, "LiberationSans", None)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to load fonts from {}: {}", font_dir, e)))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title("Adoption Agreement");

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let mut header = elements::Paragraph::new(config.name.clone());
    header.set_alignment(Alignment::Center);
    doc.push(header.styled(style::Style::new().bold().with_font_size(18)));

    if let Some(address) = &config.address {
        let mut line = elements::Paragraph::new(address.clone());
        line.set_alignment(Alignment::Center);
        doc.push(line.styled(style::Style::new().with_font_size(9)));
    }
    let contact = match (&config.phone, &config.email) {
        (Some(phone), Some(email)) => Some(format!("{} | {}", phone, email)),
        (Some(phone), None) => Some(phone.clone()),
        (None, Some(email)) => Some(email.clone()),
        (None, None) => None,
    };
    if let Some(contact) = contact {
        let mut line = elements::Paragraph::new(contact);
        line.set_alignment(Alignment::Center);
        doc.push(line.styled(style::Style::new().with_font_size(9)));
    }

    doc.push(elements::Break::new(2));
    let mut title = elements::Paragraph::new("Adoption Agreement");
    title.set_alignment(Alignment::Center);
    doc.push(title.styled(style::Style::new().bold().with_font_size(14)));
    doc.push(elements::Break::new(1));

    let mut table = elements::TableLayout::new(vec![1, 2]);
    let mut push_row = |table: &mut elements::TableLayout, label: &str, value: String| {
        table
            .row()
            .element(
                elements::Paragraph::new(label)
                    .styled(style::Style::new().bold())
                    .padded(1),
            )
            .element(elements::Paragraph::new(value).padded(1))
            .push()
            .expect("invalid table row");
    };

    push_row(&mut table, "Animal", animal.name.clone());
    push_row(&mut table, "Animal id", animal.id.to_string());
    push_row(&mut table, "Adopter", adoption.person_name.clone());
    if let Some(document) = &adoption.person_document {
        push_row(&mut table, "Identity document", document.clone());
    }
    if let Some(address) = &adoption.person_address {
        push_row(&mut table, "Address", address.clone());
    }
    if let Some(phone) = &adoption.person_phone {
        push_row(&mut table, "Phone", phone.clone());
    }
    if let Some(email) = &adoption.person_email {
        push_row(&mut table, "Email", email.clone());
    }
    if let Some(date) = adoption.adoption_date {
        push_row(&mut table, "Adoption date", date.format("%Y-%m-%d").to_string());
    }
    doc.push(table);

    doc.push(elements::Break::new(2));
    doc.push(elements::Paragraph::new(
        "The adopter agrees to provide the animal with adequate food, shelter \
         and veterinary care, and to notify the shelter should they become \
         unable to care for the animal.",
    ));

    doc.push(elements::Break::new(3));
    doc.push(elements::Paragraph::new(
        "Signature (adopter): ______________________________",
    ));
    doc.push(elements::Break::new(2));
    doc.push(elements::Paragraph::new(
        "Signature (shelter): ______________________________",
    ));

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("failed to render agreement: {}", e)))?;
    Ok(buffer)
}
