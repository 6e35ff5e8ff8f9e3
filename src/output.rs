//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Animal, Elevage, Session, User};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Elevage {
    fn pretty_print(&self) -> String {
        let header = format!("Elevage #{}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Nom:            {}", self.nom),
            format!("Adresse:        {}", self.adresse),
        ];

        if let Some(ref telephone) = self.telephone {
            lines.push(format!("Téléphone:      {}", telephone));
        }

        if let Some(ref email) = self.email {
            lines.push(format!("Email:          {}", email));
        }

        lines.push(format!("Propriétaire:   user #{}", self.user_id));
        lines.push(format!(
            "Créé le:        {}",
            self.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        lines.join("\n")
    }
}

impl PrettyPrint for Animal {
    fn pretty_print(&self) -> String {
        let header = format!("Animal #{}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Nom:            {}", self.nom),
            format!("Elevage:        #{}", self.elevage_id),
        ];

        if let Some(ref numero) = self.numero {
            lines.push(format!("Numéro:         {}", numero));
        }

        if let Some(sexe) = self.sexe {
            lines.push(format!("Sexe:           {}", sexe));
        }

        if let Some(born) = self.date_naissance {
            lines.push(format!("Naissance:      {}", born.format("%Y-%m-%d")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let header = format!("User #{}", self.id);
        let divider = "─".repeat(header.len().max(30));

        [
            header,
            divider,
            format!("Nom:            {}", self.nom),
            format!("Email:          {}", self.email),
            format!("Rôle:           {}", self.role),
            format!(
                "Statut:         {}",
                if self.is_active() { "actif" } else { "en attente" }
            ),
        ]
        .join("\n")
    }
}

impl PrettyPrint for Session {
    fn pretty_print(&self) -> String {
        format!("Token:          {}\n{}", self.token, self.user.pretty_print())
    }
}
