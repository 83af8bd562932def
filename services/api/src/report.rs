use clap::Args;
use hackathon_admissions::config::AppConfig;
use hackathon_admissions::error::AppError;
use hackathon_admissions::workflows::rankings::{
    accepted_emails, apply_reviews, filter_applicants, write_ranked_csv, AdmissionsBoard,
    AdmissionsSnapshot, PromotionPolicy, RankingParameters, RankingPolicy, SchoolQuotas,
    ScoringWeights,
};
use hackathon_admissions::workflows::roster::{ReviewImporter, RosterImporter};
use std::fs::File;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankingsReportArgs {
    /// Roster CSV with per-applicant average scores
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Per-reviewer scores CSV; recomputes averages for every reviewed applicant
    #[arg(long)]
    pub(crate) reviews: Option<PathBuf>,
    /// Seats to fill (defaults to ADMISSIONS_TARGET_SIZE)
    #[arg(long)]
    pub(crate) target_size: Option<usize>,
    /// Per-school cap as SCHOOL=CAP; repeat for several schools, 0 means unlimited
    #[arg(long, value_parser = SchoolQuotas::parse_entry)]
    pub(crate) quota: Vec<(String, usize)>,
    /// Originality multiplier (0-2)
    #[arg(long, default_value_t = 1.0)]
    pub(crate) originality: f64,
    /// Technicality multiplier (0-2)
    #[arg(long, default_value_t = 1.0)]
    pub(crate) technicality: f64,
    /// Passion multiplier (0-2)
    #[arg(long, default_value_t = 1.0)]
    pub(crate) passion: f64,
    /// Gender bias multiplier (0-2, 1 is neutral)
    #[arg(long, default_value_t = 1.0)]
    pub(crate) gender: f64,
    /// List referred applicants ahead of everyone else
    #[arg(long)]
    pub(crate) referrals_first: bool,
    /// Never promote past a school's cap
    #[arg(long)]
    pub(crate) respect_quota: bool,
    /// Only print applicants matching this name, email, school, or major
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Top-ranked applicants included in the distribution statistics
    #[arg(long)]
    pub(crate) stats_window: Option<usize>,
    /// Write accepted emails, one per line, to this file
    #[arg(long)]
    pub(crate) export_emails: Option<PathBuf>,
    /// Write the full ranked table as CSV to this file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) fn run_rankings_report(args: RankingsReportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let mut roster = RosterImporter::from_path(&args.roster)?;
    if let Some(path) = &args.reviews {
        let reviews = ReviewImporter::from_path(path)?;
        println!("Applied {} review(s) from {}", reviews.len(), path.display());
        roster = apply_reviews(roster, &reviews);
    }

    let mut board = AdmissionsBoard::new(
        roster,
        RankingParameters::with_target_size(config.admissions.target_size),
    );

    let mut draft = board.stage();
    draft
        .set_weights(ScoringWeights {
            originality: args.originality,
            technicality: args.technicality,
            passion: args.passion,
            gender: args.gender,
        })
        .set_ranking_policy(RankingPolicy {
            referrals_first: args.referrals_first,
        });
    if let Some(target_size) = args.target_size {
        draft.set_target_size(target_size);
    }
    if args.respect_quota {
        draft.set_promotion_policy(PromotionPolicy::RespectQuota);
    }
    for (school, cap) in &args.quota {
        draft.set_quota(school.clone(), *cap);
    }
    board.commit(draft)?;

    let window = args.stats_window.unwrap_or(config.admissions.stats_window);
    let snapshot = board.snapshot(window);
    render_rankings_report(&snapshot, args.search.as_deref());

    if let Some(path) = &args.export_emails {
        std::fs::write(path, accepted_emails(&snapshot.allocation))?;
        println!("\nAccepted emails written to {}", path.display());
    }
    if let Some(path) = &args.csv {
        write_ranked_csv(&snapshot.ranked(), File::create(path)?)?;
        println!("Ranked table written to {}", path.display());
    }

    Ok(())
}

fn render_rankings_report(snapshot: &AdmissionsSnapshot, search: Option<&str>) {
    let parameters = &snapshot.parameters;
    let counts = &snapshot.counts;

    println!("Admissions rankings");
    println!(
        "Weights: originality {:.2}, technicality {:.2}, passion {:.2}, gender {:.2}",
        parameters.weights.originality,
        parameters.weights.technicality,
        parameters.weights.passion,
        parameters.weights.gender
    );
    println!(
        "Target class size {} with {} school quota(s)",
        parameters.target_size,
        parameters.quotas.limited().count()
    );
    println!(
        "{} applicants: {} accepted, {} promoted, {} over quota, {} out of space",
        counts.applicants, counts.accepted, counts.promoted, counts.quota_exceeded, counts.no_space
    );

    if !snapshot.overruns.is_empty() {
        println!("\nSchools booked above quota by promotion");
        for overrun in &snapshot.overruns {
            println!(
                "- {}: {} admitted, cap {}",
                overrun.school, overrun.admitted, overrun.cap
            );
        }
    }

    println!("\nAdmitted per school");
    for (school, count) in &snapshot.allocation.school_counts {
        println!("- {school}: {count}");
    }

    println!(
        "\nGender distribution (top {} of {})",
        snapshot.stats.considered, snapshot.stats.window
    );
    for share in &snapshot.stats.genders {
        println!("- {}: {} ({:.2}%)", share.label, share.count, share.percentage);
    }

    println!("\nSchool distribution");
    for share in &snapshot.stats.schools {
        println!("- {}: {} ({:.2}%)", share.school, share.count, share.percentage);
    }

    let ranked = snapshot.ranked();
    let rows = filter_applicants(&ranked, search.unwrap_or(""));
    println!("\nRanked applicants ({} shown)", rows.len());
    for applicant in rows {
        let status = applicant
            .quota_status
            .map(|status| status.label())
            .unwrap_or("unallocated");
        println!(
            "{:>4}. {} <{}> | {} | {:.2} | {}",
            applicant.rank,
            applicant.record.name,
            applicant.record.email,
            applicant.school_bucket(),
            applicant.composite_score,
            status
        );
    }
}
