use crate::infra::{build_services, parse_date};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use siwas::error::AppError;
use siwas::workflows::oversight::{
    ActorId, DocumentCategory, DocumentDraft, FindingCategory, FindingDraft, FindingSeverity,
    FindingStatus, FindingVariant, MonitoringCategory, MonitoringDraft, MonitoringStatus,
    MonitoringUpdate, PackageCategory, PackageDraft, PackageStatus, ProcurementMethod,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Package start date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) start_date: Option<NaiveDate>,
    /// Package end date (YYYY-MM-DD). Defaults to start_date + 270 days.
    #[arg(long, value_parser = parse_date)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Skip the monitoring portion of the demo.
    #[arg(long)]
    pub(crate) skip_monitoring: bool,
}

fn document(name: &str, category: DocumentCategory, size_bytes: u64) -> DocumentDraft {
    let mime_type = mime_guess::from_path(name).first_or_octet_stream();
    DocumentDraft {
        name: name.to_string(),
        category,
        storage_key: format!("blob://siwas/demo/{name}"),
        size_bytes,
        mime_type: mime_type.essence_str().to_string(),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        start_date,
        end_date,
        skip_monitoring,
    } = args;

    let start_date = start_date.unwrap_or_else(|| Local::now().date_naive());
    let end_date = end_date.unwrap_or(start_date + Duration::days(270));

    let services = build_services();
    let ppk = ActorId("ppk.demo".to_string());
    let inspector = ActorId("itwasda.demo".to_string());

    println!("Procurement oversight demo");
    println!("Execution window: {start_date} -> {end_date}");

    let package = match services.packages.create(
        ppk.clone(),
        PackageDraft {
            code: "PKG-DEMO-001".to_string(),
            plan_reference: "RUP-DEMO-0001".to_string(),
            name: "District road rehabilitation".to_string(),
            category: PackageCategory::Construction,
            value: 750_000_000,
            method: ProcurementMethod::Tender,
            start_date: Some(start_date),
            end_date: Some(end_date),
        },
    ) {
        Ok(package) => package,
        Err(err) => {
            println!("  Package creation rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "\nCreated {} ({}) -> status {}, planned {} days",
        package.code,
        package.id.0,
        package.status.label(),
        package.duration_days.unwrap_or(0)
    );

    // The gate refuses attachments while the package is still a draft.
    let premature = services.documents.attach(
        package.id.clone(),
        ppk.clone(),
        document("tender-dossier.pdf", DocumentCategory::Tender, 1_204_552),
    );
    if let Err(err) = premature {
        println!("  Attachment before publication refused: {err}");
    }

    let package = match services
        .packages
        .transition(&package.id, PackageStatus::Published)
    {
        Ok(package) => package,
        Err(err) => {
            println!("  Publication refused: {err}");
            return Ok(());
        }
    };
    println!("Published -> status {}", package.status.label());

    for draft in [
        document("tender-dossier.pdf", DocumentCategory::Tender, 1_204_552),
        document("signed-contract.pdf", DocumentCategory::Contract, 812_440),
        document("site-survey.xlsx", DocumentCategory::Planning, 94_120),
    ] {
        match services
            .documents
            .attach(package.id.clone(), ppk.clone(), draft)
        {
            Ok(doc) => println!(
                "  Attached {} ({}, {} bytes)",
                doc.name, doc.mime_type, doc.size_bytes
            ),
            Err(err) => println!("  Attachment refused: {err}"),
        }
    }

    let package = match services
        .packages
        .transition(&package.id, PackageStatus::OnProgress)
    {
        Ok(package) => package,
        Err(err) => {
            println!("  Start of execution refused: {err}");
            return Ok(());
        }
    };
    println!("Execution started -> status {}", package.status.label());

    let finding = match services.findings.create(
        package.id.clone(),
        FindingVariant::Internal,
        inspector.clone(),
        FindingDraft {
            finding_number: "IT-DEMO-014".to_string(),
            category: FindingCategory::Administrative,
            description: "Progress reports filed without field verification".to_string(),
            severity: FindingSeverity::Medium,
            responsible_party: ppk.clone(),
            raised_on: start_date + Duration::days(30),
        },
    ) {
        Ok(finding) => finding,
        Err(err) => {
            println!("  Finding refused: {err}");
            return Ok(());
        }
    };
    println!(
        "\nInternal finding {} raised ({} severity, status {})",
        finding.finding_number,
        finding.severity.label(),
        finding.status.label()
    );

    if !skip_monitoring {
        // Monitoring stays shut until an internal finding resolves.
        let gated = services.monitoring.create(
            package.id.clone(),
            ppk.clone(),
            MonitoringDraft {
                category: MonitoringCategory::Physical,
                period: "Q2".to_string(),
                progress: 35,
                issues: String::new(),
                recommendation: String::new(),
                monitored_on: start_date + Duration::days(60),
            },
        );
        if let Err(err) = gated {
            println!("  Monitoring before resolution refused: {err}");
        }
    }

    let finding = match services
        .findings
        .transition(&finding.id, FindingStatus::Resolved)
    {
        Ok(finding) => finding,
        Err(err) => {
            println!("  Finding resolution refused: {err}");
            return Ok(());
        }
    };
    println!(
        "Finding {} -> status {}",
        finding.finding_number,
        finding.status.label()
    );

    if !skip_monitoring {
        let entry = match services.monitoring.create(
            package.id.clone(),
            ppk.clone(),
            MonitoringDraft {
                category: MonitoringCategory::Physical,
                period: "Q2".to_string(),
                progress: 35,
                issues: "Rainy season slowed earthworks".to_string(),
                recommendation: "Re-sequence drainage ahead of paving".to_string(),
                monitored_on: start_date + Duration::days(60),
            },
        ) {
            Ok(entry) => entry,
            Err(err) => {
                println!("  Monitoring refused: {err}");
                return Ok(());
            }
        };
        println!(
            "\nMonitoring entry {} opened ({}, {}% progress)",
            entry.id.0,
            entry.status.label(),
            entry.progress
        );

        match services.monitoring.update(
            &entry.id,
            MonitoringUpdate {
                status: Some(MonitoringStatus::Completed),
                progress: Some(100),
                issues: None,
                recommendation: None,
            },
        ) {
            Ok(entry) => println!(
                "Monitoring entry closed ({}, {}% progress)",
                entry.status.label(),
                entry.progress
            ),
            Err(err) => println!("  Monitoring close refused: {err}"),
        }
    }

    let package = match services
        .packages
        .transition(&package.id, PackageStatus::Completed)
    {
        Ok(package) => package,
        Err(err) => {
            println!("  Completion refused: {err}");
            return Ok(());
        }
    };
    println!("\nPackage completed -> status {}", package.status.label());

    match services.reports.summary() {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("\nPortfolio summary:\n{json}"),
            Err(err) => println!("  Summary serialization failed: {err}"),
        },
        Err(err) => println!("  Summary unavailable: {err}"),
    }

    Ok(())
}
