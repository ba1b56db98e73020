//! Segmentation and recommendation commands.
//!
//! `segment` and `recommend` are customer-facing and follow the fallback
//! policy (plausible defaults instead of errors). `train` and
//! `probabilities` are operator tools and surface failures as-is.

use clap::Subcommand;

use fresh_fold_client::ml::{
    recommendations_or_default, request_from_stats, segment_or_default,
};

use super::Context;

#[derive(Subcommand)]
pub enum MlAction {
    /// Classify the current customer from their local order history
    Segment {
        /// Use the decision-tree model instead of Naive Bayes
        #[arg(long)]
        decision_tree: bool,
    },
    /// Recommend services for the current customer
    Recommend,
    /// Retrain the Naive Bayes segmentation model
    Train,
    /// Per-class probabilities for the current customer
    Probabilities,
}

pub async fn run(context: &Context, action: MlAction) -> Result<(), Box<dyn std::error::Error>> {
    let request = request_from_stats(&context.orders.stats());

    match action {
        MlAction::Segment { decision_tree } => {
            let segment = if decision_tree {
                // Operator variant: no fallback, failures surface
                context.client.segment_decision_tree(&request).await?
            } else {
                segment_or_default(&context.client, &request).await
            };
            println!(
                "Segment: {} (confidence {:.0}%)",
                segment.segment,
                segment.confidence * 100.0
            );
        }
        MlAction::Recommend => {
            let recommendations =
                recommendations_or_default(&context.client, &request).await;
            for recommendation in &recommendations {
                match &recommendation.reason {
                    Some(reason) => println!(
                        "{:<20} {:>5.2}  {reason}",
                        recommendation.service, recommendation.score
                    ),
                    None => println!(
                        "{:<20} {:>5.2}",
                        recommendation.service, recommendation.score
                    ),
                }
            }
        }
        MlAction::Train => {
            let result = context.client.train_naive_bayes().await?;
            println!(
                "Trained on {} samples, accuracy {:.1}%",
                result.samples,
                result.accuracy * 100.0
            );
        }
        MlAction::Probabilities => {
            let probabilities = context.client.predict_probabilities(&request).await?;
            for p in &probabilities {
                println!("{:<16} {:>6.1}%", p.class, p.probability * 100.0);
            }
        }
    }
    Ok(())
}
