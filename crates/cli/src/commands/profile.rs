//! Profile commands.

use clap::Subcommand;

use fresh_fold_client::api::profile::UserProfile;

use super::Context;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Update profile fields (unset fields keep their value)
    Update {
        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Default pickup address
        #[arg(long)]
        address: Option<String>,

        /// Fabric-care notes for the facility
        #[arg(long)]
        care_notes: Option<String>,
    },
}

pub async fn run(context: &Context, action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProfileAction::Show => {
            let profile = context.client.profile().await?;
            print_profile(&profile);
        }
        ProfileAction::Update {
            name,
            phone,
            address,
            care_notes,
        } => {
            let mut profile = context.client.profile().await?;
            if let Some(name) = name {
                profile.name = name;
            }
            if let Some(phone) = phone {
                profile.phone = Some(phone);
            }
            if let Some(address) = address {
                profile.address = Some(address);
            }
            if let Some(care_notes) = care_notes {
                profile.care_notes = Some(care_notes);
            }

            let stored = context.client.update_profile(&profile).await?;
            println!("Profile updated");
            print_profile(&stored);
        }
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("Name:    {}", profile.name);
    println!("Email:   {}", profile.email);
    if let Some(phone) = &profile.phone {
        println!("Phone:   {phone}");
    }
    if let Some(address) = &profile.address {
        println!("Address: {address}");
    }
    if let Some(notes) = &profile.care_notes {
        println!("Notes:   {notes}");
    }
}
