//! Ready-made museum exhibits as markdown.

/// Phone phreaking and the blue box era.
pub const PHREAKING: &str = "\
# 📞 Phone Phreaking History

## The Blue Box Era

Phone phreaking began in the **1960s** when hackers discovered that a 2600 Hz tone could manipulate AT&T's long-distance switching systems.

- **Blue Box** - Generated tones to make free calls
- **Red Box** - Simulated coin deposits
- **Black Box** - Manipulated voltage to receive calls for free

## Notable Phreakers
- **Cap'n Crunch** (John Draper) - Used a toy whistle from Captain Crunch cereal
- **Steve Wozniak** - Built and sold blue boxes before founding Apple";

/// Bulletin board systems of the 80s and 90s.
pub const BBS: &str = "\
# 💾 Bulletin Board Systems (1980s-90s)

BBSes were the digital gathering places before the modern internet.

## Famous Underground BBSes
- **Black Ice Private** - Elite warez distribution
- **The Temple of the Screaming Electron** - San Francisco hub
- **TOTSE** - Text files on subjects ranging from anarchy to technology

## BBS Culture
- **FidoNet** - Worldwide network connecting thousands of BBSes
- **ANSI Art** - Vibrant digital art form born in the BBS scene
- **Warez** - Distribution of cracked software";

pub const HACKTIVISM: &str = "\
# ✊ Hacktivism Origins

## The Birth of Digital Activism

Hacktivism combines hacking skills with political activism.

## Key Moments
- **1994**: Strano Network initiates first virtual sit-in
- **1996**: Cult of the Dead Cow coins term \"hacktivism\"
- **1998**: Electronic Disturbance Theater develops FloodNet

## Tactics
- **Virtual Sit-ins** - Overwhelming websites with traffic
- **Website Defacements** - Changing content to spread messages
- **Information Liberation** - Releasing classified documents";

/// L0pht Heavy Industries, 1992-2000.
pub const LOPHT: &str = "\
# 🔐 L0PHT H34VY INDU5TR1E5

## H4CK3R TH1NK T4NK

L0pht Heavy Industries was one of the most influential hacker collectives of the 1990s, operating from 1992 to 2000 in Boston, Massachusetts.

## K3Y M3MB3R5
- **Brian Oblivion** - Founding member
- **Count Zero** - Founding member
- **Dildog** - Developer of L0phtCrack
- **Kingpin** - Hardware specialist
- **Mudge** - Security researcher
- **Space Rogue** - Published Hacker News Network
- **Weld Pond** - Windows security expert

## F4M0U5 PR0DUCT5
- **L0phtCrack** - Windows NT password cracker
- **Whacked Mac Archives** - Collection of Macintosh software
- **POCSAG Decoder** - Hardware for decoding pager messages

## H15T0R1C4L 1MP4CT
- **1998 Congressional Testimony** - \"We could shut down the entire Internet in 30 minutes\"
- **Pioneered responsible disclosure** of security vulnerabilities
- **Influenced US cybersecurity policy** through direct government engagement";

/// A 1997-style security advisory on LM hashes.
pub const LOPHT_ADVISORY: &str = "\
# L0PHT S3CUR1TY 4DV1S0RY

## ADVISORY: Windows NT Passwords Cryptographically Weak

**Release Date**: March 1997
**Severity**: Critical
**Systems Affected**: All Windows NT systems

## DESCRIPTION
The authentication mechanism used in Windows NT is cryptographically weak and allows attackers to brute force passwords regardless of password complexity.

## DETAILS
Microsoft's implementation of the LM hash algorithm:
1. Converts all lowercase to uppercase
2. Pads passwords to 14 characters
3. Splits the password into two 7 character chunks
4. Creates a hash from each chunk separately

This implementation significantly reduces the complexity of cracking passwords as each 7-character chunk can be attacked independently.

## PROOF OF CONCEPT
The L0phtCrack tool demonstrates this vulnerability by recovering Windows NT password hashes at high speed using standard hardware.

## RECOMMENDATION
- Use NTLM instead of LM hash where possible
- Implement strong password policies
- Consider additional authentication factors
- Monitor for unauthorized access attempts

Discovered by The L0pht - 1997";

/// Hacktivism and transparency projects in Brazil.
pub const BRAZIL: &str = "\
# 🇧🇷 Brazilian Hacker History

## Digital Activism in Brazil

Brazil has a unique hacker culture influenced by political and economic factors.

## Key Events
- **2011**: LulzSec Brazil targets government sites
- **2013**: Hacktivists support World Cup protests
- **2016**: Political transition period sees rise in hacktivism
- **2020**: Increased focus on government transparency

## Notable Operations
- **Operação Falcão Negro** - Targeting corruption
- **Vazamento BR** - Database leaks exposing government information
- **Projetos de Transparência** - Tools for monitoring political activities

## Cultural Impact
The Brazilian hacker scene blends global hacker culture with local political activism, often focusing on government transparency and anti-corruption.";

/// The web archive wing, written in leet from the start.
pub const WEBARCHIVE_NFT: &str = "\
# 🏛️ W3B 4RCH1V3 NFT MU53UM

## QU4NTUM PR353RV4T10N PR0J3CT

The Web Archive NFT Museum preserves critical hacker history artifacts through quantum-resistant cryptography for the year 2420 and beyond.

## K3Y C0LL3CT10N5
- **L0pht Advisories** - Complete set of security advisories from 1992-2000
- **Historical H4X0R Tools** - Original software with operation capability
- **Congressional Testimony** - Full audio-visual records
- **Hacker Manifestos** - Original digital text files

## PR353RV4T10N T3CHN0L0GY
- **Post-Quantum Cryptography** - Lattice-based encryption resistant to quantum attacks
- **Blockchain Preservation** - Multi-chain distributed verification
- **Temporal Validation** - Time-locked proof mechanisms
- **Holographic Interfaces** - Multi-dimensional interaction with artifacts

## 2420 V151ON
This collection ensures that future generations will understand the origins of digital security culture and can access functional historical tools regardless of technological evolution.";

/// Names accepted by [`preset`], in display order.
pub const PRESET_NAMES: [&str; 7] = [
    "phreaking",
    "bbs",
    "hacktivism",
    "lopht",
    "lopht-advisory",
    "brazil",
    "webarchive-nft",
];

/// Look up a preset by name. Case-insensitive; `_` and `-` are interchangeable.
pub fn preset(name: &str) -> Option<&'static str> {
    match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "phreaking" => Some(PHREAKING),
        "bbs" => Some(BBS),
        "hacktivism" => Some(HACKTIVISM),
        "lopht" => Some(LOPHT),
        "lopht-advisory" => Some(LOPHT_ADVISORY),
        "brazil" => Some(BRAZIL),
        "webarchive-nft" => Some(WEBARCHIVE_NFT),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in PRESET_NAMES {
            let md = preset(name).unwrap_or_else(|| panic!("missing preset {name}"));
            assert!(md.starts_with("# "), "{name} should open with a heading");
        }
    }

    #[test]
    fn lookup_is_forgiving() {
        assert_eq!(preset("LOPHT_ADVISORY"), Some(LOPHT_ADVISORY));
        assert_eq!(preset(" bbs "), Some(BBS));
        assert_eq!(preset("warez"), None);
    }

    #[test]
    fn archive_wings_are_listed() {
        assert_eq!(preset("webarchive_nft"), Some(WEBARCHIVE_NFT));
        assert_eq!(preset("Brazil"), Some(BRAZIL));
        assert!(BRAZIL.contains("Operação Falcão Negro"));
        assert!(WEBARCHIVE_NFT.contains("## 2420 V151ON"));
    }
}
