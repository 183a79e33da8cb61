use e91_sim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    println!("E91 Phase 2: raw key generation");

    let mut rng = StdRng::from_entropy();
    let mut sampler = StateSampler;
    let config = KeyGenConfig { count: 50 };

    let material = generate_raw_key(&config, &mut sampler, &mut rng).expect("valid configuration");

    println!("Alice bases: {:?}", material.alice_bases);
    println!("Bob bases:   {:?}", material.bob_bases);
    println!("Alice bits:  {:?}", material.raw_bits_a);
    println!("Bob bits:    {:?}", material.raw_bits_b);

    // Sifting happens on the caller side: keep only the positions where the
    // announced bases match.
    let mut sifted_alice = Vec::new();
    let mut sifted_bob = Vec::new();
    for shot in 0..material.alice_bases.len() {
        if material.alice_bases[shot] == material.bob_bases[shot] {
            sifted_alice.push(material.raw_bits_a[shot]);
            sifted_bob.push(material.raw_bits_b[shot]);
        }
    }

    println!(
        "\nSifted key ({} of {} bits survive the basis comparison):",
        sifted_alice.len(),
        config.count
    );
    println!("Alice: {:?}", sifted_alice);
    println!("Bob:   {:?}", sifted_bob);
    println!("Keys match: {}", sifted_alice == sifted_bob);
}
