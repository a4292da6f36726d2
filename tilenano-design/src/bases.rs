/*
TileNano, overhang assignment for tiled DNA origami assemblies.
    Copyright (C) 2021  Nicolas Levy <nicolaspierrelevy@gmail.com> and Nicolas Schabanel <nicolas.schabanel@ens-lyon.fr>

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.

    This program is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.

    You should have received a copy of the GNU General Public License
    along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/
//! Base pairing rules.

/// The character marking a base that has not been assigned yet in a staple sequence.
pub const PLACEHOLDER: char = '?';

/// The four bases, in the order in which random fills draw them.
pub const BASES: [char; 4] = ['A', 'T', 'G', 'C'];

/// The complement of a base. Characters that are not one of the four bases are returned
/// unchanged.
pub fn compl(c: char) -> char {
    match c {
        'A' => 'T',
        'T' => 'A',
        'G' => 'C',
        'C' => 'G',
        c => c,
    }
}

/// Complement every base of `sequence`, keeping the read direction.
pub fn complement(sequence: &str) -> String {
    sequence.chars().map(compl).collect()
}

/// Complement every base of `sequence` and read the result backward.
pub fn reverse_complement(sequence: &str) -> String {
    sequence.chars().rev().map(compl).collect()
}

pub fn reversed(sequence: &str) -> String {
    sequence.chars().rev().collect()
}

pub fn is_base(c: char) -> bool {
    BASES.contains(&c)
}
