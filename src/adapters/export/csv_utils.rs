//! CSV utilities for the leads export. Uses the `csv` crate for safe serialization.

use crate::domain::Lead;

const HEADER: [&str; 8] = [
    "Name", "Email", "Company", "Industry", "Source", "Status", "Value", "Created",
];

/// Convert leads to a CSV string with a header row.
///
/// Every field is double-quoted; embedded quotes are doubled by the writer.
pub fn leads_to_csv(leads: &[Lead]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    wtr.write_record(HEADER)?;
    for lead in leads {
        let value = format!("{:.0}", lead.value);
        let created = lead.created_at.format("%Y-%m-%d").to_string();
        wtr.write_record([
            lead.name.as_str(),
            lead.email.as_str(),
            lead.company.as_str(),
            lead.industry.as_str(),
            lead.source_url.as_str(),
            lead.status.as_str(),
            value.as_str(),
            created.as_str(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LeadStatus;
    use chrono::NaiveDate;

    fn lead(id: u32, name: &str, company: &str) -> Lead {
        Lead {
            id,
            name: name.to_string(),
            email: format!("lead{}@example.com", id),
            company: company.to_string(),
            job_title: "Head of Marketing".to_string(),
            industry: "Healthcare".to_string(),
            source_url: "https://example.com/blog/seo".to_string(),
            status: LeadStatus::Qualified,
            value: 12000.0,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[test]
    fn header_and_one_line_per_lead() {
        let leads = vec![
            lead(1, "Ana Ruiz", "Acme"),
            lead(2, "Ben Ode", "Globex"),
            lead(3, "Cy Tran", "Initech"),
        ];
        let csv = leads_to_csv(&leads).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            r#""Name","Email","Company","Industry","Source","Status","Value","Created""#
        );
        assert_eq!(
            lines[1],
            r#""Ana Ruiz","lead1@example.com","Acme","Healthcare","https://example.com/blog/seo","qualified","12000","2024-06-01""#
        );
    }

    #[test]
    fn embedded_quotes_and_commas_are_escaped() {
        let csv = leads_to_csv(&[lead(1, "Dana \"DJ\" Lee", "Smith, Jones & Co")]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert!(row.starts_with(r#""Dana ""DJ"" Lee","lead1@example.com","Smith, Jones & Co""#));
    }

    #[test]
    fn empty_input_is_header_only() {
        assert_eq!(leads_to_csv(&[]).unwrap().lines().count(), 1);
    }
}
