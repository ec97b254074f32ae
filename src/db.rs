use anyhow::Result;
use rusqlite::Connection;

use crate::model::Pokemon;

const DB_PATH: &str = "data/dex.sqlite";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pokemon (
            id          INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            dex_number  TEXT NOT NULL,
            source      TEXT NOT NULL,
            page        TEXT NOT NULL,
            document    TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_pokemon_name ON pokemon(name);
        CREATE INDEX IF NOT EXISTS idx_pokemon_dex ON pokemon(dex_number);
        ",
    )?;
    Ok(())
}

// ── Records ──

/// Bulk insert in one transaction: either the whole batch lands or none of it.
pub fn insert_pokemon(conn: &Connection, records: &[Pokemon]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO pokemon (name, dex_number, source, page, document)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for record in records {
            let document = serde_json::to_string(record)?;
            count += stmt.execute(rusqlite::params![
                record.name,
                record.metadata.dex_number,
                record.metadata.source,
                record.metadata.page,
                document,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

/// Latest stored record with this display name, if any.
pub fn fetch_by_name(conn: &Connection, name: &str) -> Result<Option<Pokemon>> {
    let mut stmt =
        conn.prepare("SELECT document FROM pokemon WHERE name = ?1 ORDER BY id DESC LIMIT 1")?;
    let mut rows = stmt.query([name])?;
    match rows.next()? {
        Some(row) => {
            let document: String = row.get(0)?;
            Ok(Some(serde_json::from_str(&document)?))
        }
        None => Ok(None),
    }
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub by_source: Vec<(String, usize)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM pokemon", [], |row| row.get(0))?;

    let mut stmt =
        conn.prepare("SELECT source, COUNT(*) FROM pokemon GROUP BY source ORDER BY source")?;
    let by_source = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Stats { total, by_source })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn open() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn record(name: &str, page: &str) -> Pokemon {
        Pokemon {
            name: name.to_string(),
            types: vec![PokeType::Electric],
            base_stats: BaseStats {
                hp: 4,
                attack: 6,
                defense: 4,
                special_attack: 5,
                special_defense: 5,
                speed: 9,
            },
            abilities: Abilities {
                basic_abilities: vec!["Static".to_string()],
                advanced_abilities: vec!["Lightning Rod".to_string()],
                high_ability: "Sequence".to_string(),
            },
            evolution: vec![],
            size_information: SizeInformation {
                height: Height {
                    ptu: SizeClass::Small,
                    freedom: "1'4\"".to_string(),
                    metric: "0.4m".to_string(),
                },
                weight: Weight {
                    ptu: 1,
                    freedom: "13.2lbs".to_string(),
                    metric: "6.0kg".to_string(),
                },
            },
            breeding_information: BreedingInformation {
                gender_ratio: GenderRatio::Split {
                    male: 50,
                    female: 50,
                },
                egg_groups: vec!["Field".to_string()],
                average_hatch_rate: Some("4 Days".to_string()),
            },
            diets: vec!["Herbivore".to_string()],
            habitats: vec!["Forest".to_string()],
            capabilities: Capabilities {
                overland: 7,
                swim: None,
                sky: None,
                levitate: None,
                burrow: None,
                high_jump: 2,
                low_jump: 2,
                power: 2,
                other: None,
            },
            skills: Skills {
                athletics: "3d6".to_string(),
                acrobatics: "3d6+1".to_string(),
                combat: "2d6".to_string(),
                stealth: "3d6+1".to_string(),
                perception: "2d6+1".to_string(),
                focus: "3d6+2".to_string(),
            },
            move_list: MoveList {
                level_up: vec![],
                tm_hm: vec!["Thunderbolt".to_string()],
                egg_moves: vec![],
                tutor_moves: vec!["Thunderbolt".to_string()],
                zygarde_cube_moves: None,
            },
            mega_evolutions: None,
            metadata: Metadata {
                source: "Paldea Dex".to_string(),
                page: page.to_string(),
                dex_number: "#25".to_string(),
            },
            extras: None,
        }
    }

    #[test]
    fn bulk_insert_round_trips_documents() {
        let conn = open();
        let records = vec![record("pikachu", "p.48"), record("raichu", "p.49")];
        assert_eq!(insert_pokemon(&conn, &records).unwrap(), 2);

        let restored = fetch_by_name(&conn, "pikachu").unwrap().unwrap();
        assert_eq!(restored, records[0]);
    }

    #[test]
    fn fetch_by_name_returns_latest_row() {
        let conn = open();
        insert_pokemon(&conn, &[record("pikachu", "p.48")]).unwrap();
        insert_pokemon(&conn, &[record("pikachu", "p.52")]).unwrap();

        let restored = fetch_by_name(&conn, "pikachu").unwrap().unwrap();
        assert_eq!(restored.metadata.page, "p.52");
    }

    #[test]
    fn unknown_name_is_none() {
        let conn = open();
        assert!(fetch_by_name(&conn, "missingno").unwrap().is_none());
    }

    #[test]
    fn stats_count_by_source() {
        let conn = open();
        insert_pokemon(&conn, &[record("pikachu", "p.48"), record("raichu", "p.49")]).unwrap();
        let stats = get_stats(&conn).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.by_source, vec![("Paldea Dex".to_string(), 2)]);
    }
}
